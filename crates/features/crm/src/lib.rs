//! CRM feature slice.
//!
//! Leads, contacts, accounts, campaigns and opportunities join every feature,
//! including features declared by slices loaded later. Lookup tables opt into
//! individual features through `#[feature_enabled]`.
mod entities;

pub use crate::entities::{
    APP_LABEL, Account, Campaign, Contact, ForecastType, Lead, LeadStatus, Opportunity,
    OpportunitySplit, OpportunityStage, OpportunityTeam,
};

use tessera_kernel::FeaturePlugin;
use tessera_registry::domain::EntityRef;
use tessera_registry::{EntityCatalog, FeatureRegistry, FeatureRequest};

/// CRM slice plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crm;

impl Crm {
    /// Entities tracked for every feature.
    #[must_use]
    pub fn primary_entities() -> [EntityRef; 5] {
        [
            EntityRef::of::<Lead>(),
            EntityRef::of::<Contact>(),
            EntityRef::of::<Account>(),
            EntityRef::of::<Campaign>(),
            EntityRef::of::<Opportunity>(),
        ]
    }
}

impl FeaturePlugin for Crm {
    fn name(&self) -> &'static str {
        APP_LABEL
    }

    fn entities(&self, catalog: &mut EntityCatalog) {
        catalog
            .register::<Lead>()
            .register::<LeadStatus>()
            .register::<Contact>()
            .register::<Account>()
            .register::<Campaign>()
            .register::<Opportunity>()
            .register::<OpportunityStage>()
            .register::<OpportunityTeam>()
            .register::<OpportunitySplit>()
            .register::<ForecastType>();
    }

    /// Annotated lookup tables are applied with the other `#[feature_enabled]` types.
    fn register(&self, registry: &mut FeatureRegistry) {
        let summary =
            registry.register_entities(Self::primary_entities(), &FeatureRequest::new().all());
        tracing::debug!(registered = summary.registered.len(), "CRM entities registered");
    }
}

/// Initialize the CRM slice.
#[must_use]
pub fn init() -> Crm {
    tracing::info!("CRM slice initialized");
    Crm
}
