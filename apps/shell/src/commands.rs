use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tessera::kernel::{Platform, choices_for};
use tessera::registry::domain::EntityType;

pub fn features(platform: &Platform, json: bool, out: &mut impl Write) -> Result<()> {
    let summary = platform.registry.summary();
    if json {
        return write_json(out, &summary.features);
    }

    for feature in &summary.features {
        writeln!(out, "{}\t{}\t{}", feature.name, feature.registry_key, feature.entities.len())?;
    }
    Ok(())
}

pub fn entities(
    platform: &Platform,
    key: &str,
    feature: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let registry = &platform.registry;
    let members = if feature {
        registry.entities_for_feature(key)
    } else {
        registry.entities_for(key)
    };
    if json {
        return write_json(out, &members);
    }

    write_entities(out, members)
}

pub fn pending(platform: &Platform, json: bool, out: &mut impl Write) -> Result<()> {
    let pending = platform.registry.pending();
    if json {
        return write_json(out, &pending);
    }

    for (feature, entities) in pending {
        let labels: Vec<_> = entities.iter().map(ToString::to_string).collect();
        writeln!(out, "{feature}: {}", labels.join(", "))?;
    }
    Ok(())
}

pub fn choices(platform: &Platform, key: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let choices = choices_for(&platform.registry, &platform.catalog, key);
    if json {
        return write_json(out, &choices);
    }

    for choice in &choices {
        writeln!(out, "{}\t{}", choice.value, choice.label)?;
    }
    Ok(())
}

pub fn summary(platform: &Platform, json: bool, out: &mut impl Write) -> Result<()> {
    let summary = platform.registry.summary();
    if json {
        return write_json(out, &summary);
    }

    writeln!(out, "plugins: {}", platform.plugins().join(", "))?;
    writeln!(out, "entities: {}", platform.catalog.len())?;
    writeln!(out, "features: {}", summary.features.len())?;
    for feature in &summary.features {
        writeln!(out, "  {} ({}): {}", feature.name, feature.registry_key, feature.entities.len())?;
    }
    writeln!(out, "all features: {}", summary.all_features.len())?;
    writeln!(out, "pending: {}", summary.pending.values().map(Vec::len).sum::<usize>())?;
    writeln!(out, "warnings: {}", summary.warnings)?;
    for warning in platform.registry.warnings() {
        writeln!(out, "  {warning}")?;
    }
    Ok(())
}

fn write_entities(out: &mut impl Write, entities: &[EntityType]) -> Result<()> {
    for entity in entities {
        writeln!(out, "{entity}")?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
