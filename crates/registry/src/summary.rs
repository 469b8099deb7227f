use serde::Serialize;
use std::collections::BTreeMap;
use tessera_domain::{EntityType, FeatureName, RegistryKey};

/// Serializable snapshot of a registry, for diagnostics and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub features: Vec<FeatureSummary>,
    pub pending: BTreeMap<FeatureName, Vec<EntityType>>,
    pub all_features: Vec<AllFeaturesEntry>,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub name: FeatureName,
    pub registry_key: RegistryKey,
    pub entities: Vec<EntityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllFeaturesEntry {
    pub entity: EntityType,
    pub exclude: Vec<FeatureName>,
}
