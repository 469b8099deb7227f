use crate::request::FeatureRequest;
use tessera_domain::{EntityType, FeatureName};

/// A `#[feature_enabled(...)]` annotation, kept as static data.
///
/// Every annotation in the final binary is collected at link time; see
/// [`FeatureRegistry::apply_declarations`](crate::FeatureRegistry::apply_declarations).
#[derive(Debug)]
pub struct FeatureDeclaration {
    pub entity: fn() -> EntityType,
    /// Explicit features plus truthy flags.
    pub features: &'static [&'static str],
    pub all: bool,
    pub exclude: &'static [&'static str],
}

impl FeatureDeclaration {
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        (self.entity)()
    }

    #[must_use]
    pub fn request(&self) -> FeatureRequest {
        FeatureRequest::new()
            .with_all(self.all)
            .features(self.features.iter().copied().map(FeatureName::from_static))
            .exclude(self.exclude.iter().copied().map(FeatureName::from_static))
    }
}

inventory::collect!(FeatureDeclaration);

/// Implemented by `#[feature_enabled]` for the annotated entity type.
pub trait FeatureEnabled {
    const DECLARATION: FeatureDeclaration;
}

/// Every annotation linked into the binary, ordered by entity type.
#[must_use]
pub fn declarations() -> Vec<&'static FeatureDeclaration> {
    let mut found: Vec<_> = inventory::iter::<FeatureDeclaration>.into_iter().collect();
    found.sort_by_cached_key(|declaration| declaration.entity_type());
    found
}
