use serde::Serialize;
use std::fmt;
use tessera_domain::{EntityType, FeatureName, RegistryKey};

/// Outcome of declaring a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Declaration {
    /// A new feature. `enrolled` counts all-features entities added retroactively,
    /// `resolved_pending` the entities that were waiting for it.
    Declared {
        feature: FeatureName,
        registry_key: RegistryKey,
        enrolled: usize,
        resolved_pending: usize,
    },
    /// The feature existed: its key was overwritten, nothing was re-enrolled.
    Redeclared { feature: FeatureName, previous: RegistryKey, current: RegistryKey },
}

impl Declaration {
    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::Declared { .. })
    }
}

/// What a single registration did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub entity: EntityType,
    /// Features the entity was newly added to.
    pub enrolled: Vec<(FeatureName, RegistryKey)>,
    /// Features the entity already belonged to.
    pub unchanged: Vec<(FeatureName, RegistryKey)>,
    /// Undeclared features the entity now waits for.
    pub pending: Vec<FeatureName>,
    /// The entity is tracked for every future feature.
    pub tracks_all: bool,
}

impl Registration {
    pub(crate) const fn new(entity: EntityType, tracks_all: bool) -> Self {
        Self {
            entity,
            enrolled: Vec::new(),
            unchanged: Vec::new(),
            pending: Vec::new(),
            tracks_all,
        }
    }

    /// `true` when the entity ends up enrolled, waiting, or tracked for future features.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        self.tracks_all
            || !self.enrolled.is_empty()
            || !self.unchanged.is_empty()
            || !self.pending.is_empty()
    }
}

/// Result of a batch registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub registered: Vec<String>,
    pub failed: Vec<String>,
    pub total: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A recoverable problem noticed while populating the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryWarning {
    /// A feature was declared twice; the registry key was overwritten.
    AlreadyDeclared { feature: FeatureName, previous: RegistryKey, current: RegistryKey },
    /// An entity asked for a feature that is not declared yet; it is kept pending.
    UnknownFeature { feature: FeatureName, entity: EntityType },
    /// A registration named no feature at all.
    NothingToRegister { entity: EntityType },
    /// An entity reference could not be resolved.
    Unresolved { reference: String, reason: String },
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDeclared { feature, previous, current } => write!(
                f,
                "feature '{feature}' already declared, \
                 registry key changed from '{previous}' to '{current}'"
            ),
            Self::UnknownFeature { feature, entity } => {
                write!(f, "unknown feature '{feature}' for entity {entity}, kept pending")
            },
            Self::NothingToRegister { entity } => {
                write!(f, "no features specified for entity {entity}")
            },
            Self::Unresolved { reference, reason } => {
                write!(f, "entity {reference} could not be registered: {reason}")
            },
        }
    }
}
