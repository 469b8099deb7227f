use std::fmt::Debug;
use tessera_registry::{EntityCatalog, FeatureRegistry};

/// A feature slice's registration module.
///
/// Plugins run in two passes: every plugin contributes its entity types to the
/// catalog first, then every plugin declares features and registers entities.
/// A slice can therefore reference another slice's entities and features no
/// matter which of them is loaded first.
pub trait FeaturePlugin: Debug + Send + Sync {
    /// Unique plugin name, used in logs.
    fn name(&self) -> &'static str;

    /// Adds the slice's entity types to the catalog.
    fn entities(&self, catalog: &mut EntityCatalog);

    /// Declares the slice's features and opts its entities into features.
    fn register(&self, registry: &mut FeatureRegistry);
}
