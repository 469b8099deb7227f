//! Every `#[feature_enabled]` in this binary is collected, so these
//! annotations live in their own test target.

use tessera_registry::domain::EntityType;
use tessera_registry::{
    Entity, EntityCatalog, FeatureEnabled, FeatureRegistry, declarations, feature_enabled,
};

#[feature_enabled(all, exclude = ["dashboard_component", "report_choices"])]
#[derive(Entity)]
#[entity(app_label = "org")]
pub struct Company;

#[feature_enabled(import_data, export_data, global_search = true, dashboard_component = false)]
#[derive(Entity)]
#[entity(app_label = "crm", model_name = "OpportunityStage", verbose_name = "Stage")]
pub struct Stage;

#[feature_enabled(features = ["report_choices"])]
#[derive(Entity)]
#[entity(app_label = "crm")]
pub struct OpportunitySplit;

#[derive(Entity)]
#[entity(app_label = "crm")]
pub struct ForecastType;

fn registry() -> FeatureRegistry {
    let mut catalog = EntityCatalog::new();
    catalog.register::<Company>().register::<Stage>().register::<OpportunitySplit>();
    FeatureRegistry::builder().resolver(catalog).core_features().build()
}

#[test]
fn derive_sets_entity_identity() {
    assert_eq!(Stage::entity_type(), EntityType::from_static("crm", "OpportunityStage"));
    assert_eq!(Stage::verbose_name(), "Stage");
    assert_eq!(ForecastType::entity_type().to_string(), "crm.ForecastType");
    assert_eq!(ForecastType::verbose_name(), "forecast type");
}

#[test]
fn flags_become_features() {
    let declaration = &Stage::DECLARATION;
    assert_eq!(declaration.features, ["import_data", "export_data", "global_search"]);
    assert!(!declaration.all);
    assert!(declaration.exclude.is_empty());
}

#[test]
fn annotations_are_collected_in_entity_order() {
    let found: Vec<_> = declarations().iter().map(|d| d.entity_type().to_string()).collect();
    assert_eq!(found, ["crm.OpportunitySplit", "crm.OpportunityStage", "org.Company"]);
}

#[test]
fn applying_annotations_enrolls_entities() {
    let mut registry = registry();
    assert_eq!(registry.apply_declarations(), 3);

    let company = Company::entity_type();
    let stage = Stage::entity_type();
    assert_eq!(registry.entities_for("import_models"), [stage.clone(), company.clone()]);
    assert_eq!(registry.entities_for("global_search_models"), [stage, company.clone()]);
    assert_eq!(registry.pending_for("report_choices"), [OpportunitySplit::entity_type()]);

    registry.declare_feature("report_choices", Some("report_models".into()));
    registry.declare_feature("dashboard_component", None);

    assert_eq!(registry.entities_for("report_models"), [OpportunitySplit::entity_type()]);
    assert!(registry.entities_for("dashboard_component_models").is_empty());
    assert!(registry.exclusions_for(&company).is_some_and(|set| set.len() == 2));
}

#[test]
fn annotate_applies_a_single_type() {
    let mut registry = registry();
    let registration = registry.annotate::<Company>();

    assert!(registration.tracks_all);
    assert_eq!(registration.enrolled.len(), 3);
    assert!(registry.entities_for("report_models").is_empty());
}
