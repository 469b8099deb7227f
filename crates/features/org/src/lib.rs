//! Organisation feature slice.
//!
//! Companies, departments, roles and users take part in every feature except
//! dashboard components and report choices.
mod entities;

pub use crate::entities::{APP_LABEL, Company, Department, Role, User};

use tessera_kernel::FeaturePlugin;
use tessera_registry::domain::EntityRef;
use tessera_registry::{EntityCatalog, FeatureRegistry, FeatureRequest};

/// Features organisation entities never take part in.
pub const EXCLUDED_FEATURES: &[&str] = &["dashboard_component", "report_choices"];

/// Organisation slice plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Org;

impl FeaturePlugin for Org {
    fn name(&self) -> &'static str {
        APP_LABEL
    }

    fn entities(&self, catalog: &mut EntityCatalog) {
        catalog
            .register::<Company>()
            .register::<Department>()
            .register::<Role>()
            .register::<User>();
    }

    fn register(&self, registry: &mut FeatureRegistry) {
        let request = FeatureRequest::new().all().exclude(EXCLUDED_FEATURES.iter().copied());
        let summary = registry.register_entities(
            [
                EntityRef::of::<Company>(),
                EntityRef::of::<Department>(),
                EntityRef::of::<Role>(),
                EntityRef::of::<User>(),
            ],
            &request,
        );
        tracing::debug!(registered = summary.registered.len(), "Organisation entities registered");
    }
}

/// Initialize the organisation slice.
#[must_use]
pub fn init() -> Org {
    tracing::info!("Organisation slice initialized");
    Org
}
