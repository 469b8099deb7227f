use crate::constants::CORE_FEATURES;
use crate::entity::EntityRef;
use crate::flags::LegacyFeatures;
use crate::names::{FeatureName, RegistryKey};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across the platform.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TesseraConfigInner {
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct TesseraConfig {
    #[serde(flatten, default)]
    inner: Arc<TesseraConfigInner>,
}

impl Deref for TesseraConfig {
    type Target = TesseraConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for TesseraConfig {
    fn deref_mut(&mut self) -> &mut TesseraConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    /// One of `trace`, `debug`, `info`, `warn`, `error`, `off`.
    pub level: String,
    pub console: bool,
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
    pub env_filter: Option<String>,
}

/// Feature registry bootstrap configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Declared before any plugin runs.
    pub core_features: Vec<FeatureDecl>,
    /// Declared after every plugin has run.
    pub features: Vec<FeatureDecl>,
    pub registrations: Vec<RegistrationDecl>,
    /// Apply `#[feature_enabled]` annotations linked into the binary.
    pub collect_annotations: bool,
}

/// A feature to declare, optionally with an explicit registry key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureDecl {
    pub name: FeatureName,
    #[serde(default)]
    pub registry_key: Option<RegistryKey>,
}

impl FeatureDecl {
    pub fn new(name: impl Into<FeatureName>, registry_key: Option<RegistryKey>) -> Self {
        Self { name: name.into(), registry_key }
    }
}

/// A manifest registration: entities opted into features without code changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationDecl {
    pub entities: Vec<EntityRef>,
    pub features: Vec<FeatureName>,
    pub all: bool,
    pub exclude: Vec<FeatureName>,
    /// Free-form switches; `true` entries are feature names.
    pub flags: BTreeMap<FeatureName, bool>,
    pub legacy: LegacyFeatures,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "tessera".to_owned(),
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            max_files: 10,
            env_filter: None,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            core_features: CORE_FEATURES
                .iter()
                .map(|(name, key)| {
                    FeatureDecl::new(
                        FeatureName::from_static(name),
                        Some(RegistryKey::from_static(key)),
                    )
                })
                .collect(),
            features: Vec::new(),
            registrations: Vec::new(),
            collect_annotations: true,
        }
    }
}
