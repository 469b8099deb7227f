use serde::Serialize;
use tessera_domain::entity::humanize;
use tessera_registry::{EntityCatalog, FeatureRegistry};

/// A selectable entity type, as shown in report, dashboard and activity pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// `app_label.modelname`, lowercased model name.
    pub value: String,
    pub label: String,
}

/// Choices for every entity under `registry_key`, in registration order.
///
/// Labels come from the catalog's verbose names, title-cased. Entities missing from
/// the catalog fall back to their humanized model name.
#[must_use]
pub fn choices_for(
    registry: &FeatureRegistry,
    catalog: &EntityCatalog,
    registry_key: &str,
) -> Vec<Choice> {
    registry
        .entities_for(registry_key)
        .iter()
        .map(|entity| {
            let label = catalog.entry(entity).map_or_else(
                || title_case(&humanize(entity.model_name())),
                |entry| title_case(&entry.verbose_name),
            );
            Choice { value: entity.lookup_key(), label }
        })
        .collect()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
