//! Insights feature slice: reports, dashboards and activities.
//!
//! Declares the features other slices opt into when their entities can be
//! reported on, shown on dashboards, or linked to activities.
mod entities;

pub use crate::entities::{APP_LABEL, Activity, DashboardFolder, Report, ReportFolder};

use tessera_kernel::FeaturePlugin;
use tessera_registry::domain::{EntityRef, RegistryKey};
use tessera_registry::{EntityCatalog, FeatureRegistry, FeatureRequest};

pub const REPORT_CHOICES: &str = "report_choices";
pub const REPORT_MODELS: &str = "report_models";
pub const DASHBOARD_COMPONENT: &str = "dashboard_component";
pub const DASHBOARD_COMPONENT_MODELS: &str = "dashboard_component_models";
pub const ACTIVITY_RELATED: &str = "activity_related";
pub const ACTIVITY_RELATED_MODELS: &str = "activity_related_models";

/// Insights slice plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Insights;

impl FeaturePlugin for Insights {
    fn name(&self) -> &'static str {
        APP_LABEL
    }

    fn entities(&self, catalog: &mut EntityCatalog) {
        catalog
            .register::<ReportFolder>()
            .register::<Report>()
            .register::<DashboardFolder>()
            .register::<Activity>();
    }

    fn register(&self, registry: &mut FeatureRegistry) {
        registry.declare_feature(REPORT_CHOICES, Some(RegistryKey::from_static(REPORT_MODELS)));
        registry.declare_feature(
            DASHBOARD_COMPONENT,
            Some(RegistryKey::from_static(DASHBOARD_COMPONENT_MODELS)),
        );
        registry.declare_feature(
            ACTIVITY_RELATED,
            Some(RegistryKey::from_static(ACTIVITY_RELATED_MODELS)),
        );

        registry.register_entities(
            [EntityRef::of::<ReportFolder>(), EntityRef::of::<Report>()],
            &FeatureRequest::new().features(["import_data", "export_data", "global_search"]),
        );
        registry.register_entity(
            EntityRef::of::<DashboardFolder>(),
            &FeatureRequest::new().feature("global_search"),
        );
    }
}

/// Initialize the insights slice.
#[must_use]
pub fn init() -> Insights {
    tracing::info!("Insights slice initialized");
    Insights
}
