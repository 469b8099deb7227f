use serde_json::json;
use tessera_registry::domain::{EntityRef, EntityType, LegacyFeatures, RegistryKey};
use tessera_registry::{
    Declaration, EntityCatalog, FeatureRegistry, FeatureRequest, RegistryError, RegistryWarning,
};

fn entity(app_label: &'static str, model_name: &'static str) -> EntityType {
    EntityType::from_static(app_label, model_name)
}

fn crm_catalog() -> EntityCatalog {
    let mut catalog = EntityCatalog::new();
    for model in ["Lead", "Contact", "Account", "Campaign", "Opportunity"] {
        catalog.insert(entity("crm", model));
    }
    catalog
}

fn crm_registry() -> FeatureRegistry {
    FeatureRegistry::builder().resolver(crm_catalog()).core_features().build()
}

#[test]
fn registering_twice_keeps_a_single_entry() {
    let mut registry = crm_registry();
    let request = FeatureRequest::new().feature("global_search");

    assert!(registry.register_entity(("crm", "Lead"), &request));
    assert!(registry.register_entity(("crm", "Lead"), &request));

    assert_eq!(registry.entities_for("global_search_models"), [entity("crm", "Lead")]);
}

#[test]
fn second_registration_reports_unchanged_features() {
    let mut registry = crm_registry();
    let request = FeatureRequest::new().feature("import_data");

    let first = registry.register(("crm", "Lead"), &request).expect("lead resolves");
    let second = registry.register(("crm", "Lead"), &request).expect("lead resolves");

    assert_eq!(first.enrolled.len(), 1);
    assert!(second.enrolled.is_empty());
    assert_eq!(second.unchanged.len(), 1);
    assert!(second.is_effective());
}

#[test]
fn all_features_entities_join_features_declared_later() {
    let mut registry = FeatureRegistry::new();
    let lead = entity("crm", "Lead");

    assert!(registry.register_entity(lead.clone(), &FeatureRequest::new().all().excluding("x")));
    assert!(registry.declare_feature("y", None));
    assert!(registry.declare_feature("x", None));

    assert_eq!(registry.entities_for("y_models"), [lead]);
    assert!(registry.entities_for("x_models").is_empty());
}

#[test]
fn declaration_reports_retroactive_enrollments() {
    let mut registry = FeatureRegistry::new();
    let _ = registry.register(entity("crm", "Lead"), &FeatureRequest::new().all());
    let _ = registry.register(entity("crm", "Contact"), &FeatureRequest::new().all());
    let _ = registry.register(entity("crm", "Account"), &FeatureRequest::new().feature("workflow"));

    let declaration = registry.declare("workflow", Some(RegistryKey::from("workflow_models")));
    assert_eq!(
        declaration,
        Declaration::Declared {
            feature: "workflow".into(),
            registry_key: "workflow_models".into(),
            enrolled: 2,
            resolved_pending: 1,
        }
    );
    assert_eq!(
        registry.entities_for("workflow_models"),
        [entity("crm", "Lead"), entity("crm", "Contact"), entity("crm", "Account")]
    );
}

#[test]
fn pending_entities_are_enrolled_once_the_feature_exists() {
    let mut registry = crm_registry();
    let lead = entity("crm", "Lead");
    let request = FeatureRequest::new().feature("z");

    assert!(registry.register_entity(lead.clone(), &request));
    assert!(registry.register_entity(lead.clone(), &request));
    assert!(registry.entities_for("z_models").is_empty());
    assert!(
        registry
            .features()
            .all(|(_, key)| !registry.entities_for(key.as_str()).contains(&lead))
    );
    assert_eq!(registry.pending_for("z"), [lead.clone()]);

    assert!(registry.declare_feature("z", None));

    assert_eq!(registry.entities_for("z_models"), [lead]);
    assert!(registry.pending_for("z").is_empty());
    assert!(registry.pending().is_empty());
}

#[test]
fn exclusion_wins_over_explicit_inclusion() {
    let mut registry = crm_registry();
    let request = FeatureRequest::new().all().excluding("import_data").feature("import_data");

    assert!(registry.register_entity(("crm", "Account"), &request));

    assert!(registry.entities_for("import_models").is_empty());
    assert_eq!(registry.entities_for("export_models"), [entity("crm", "Account")]);
    assert_eq!(registry.entities_for("global_search_models"), [entity("crm", "Account")]);
}

#[test]
fn exclusion_applies_without_all() {
    let mut registry = crm_registry();
    let request = FeatureRequest::new()
        .features(["import_data", "global_search"])
        .excluding("import_data");

    assert!(registry.register_entity(("crm", "Contact"), &request));
    assert!(registry.entities_for("import_models").is_empty());
    assert_eq!(registry.entities_for("global_search_models"), [entity("crm", "Contact")]);
    assert!(registry.all_features().next().is_none(), "only `all` requests are tracked");
}

#[test]
fn batch_registration_survives_individual_failures() {
    let mut registry = crm_registry();
    let entities = vec![
        EntityRef::by_name("crm", "Lead"),
        EntityRef::by_name("crm", "Contact"),
        EntityRef::by_name("crm", "Ghost"),
        EntityRef::by_name("crm", "Account"),
        EntityRef::Direct(entity("crm", "Campaign")),
    ];

    let summary =
        registry.register_entities(entities, &FeatureRequest::new().feature("global_search"));

    assert_eq!(summary.total, 5);
    assert_eq!(summary.failed, ["crm.Ghost"]);
    assert_eq!(summary.registered.len(), 4);
    assert_eq!(registry.entities_for("global_search_models").len(), 4);
    assert!(!summary.is_complete());
}

#[test]
fn batch_summary_serializes_like_a_report() {
    let mut registry = crm_registry();
    let summary = registry.register_entities(
        [("crm", "Lead"), ("crm", "Nope")],
        &FeatureRequest::new().legacy(LegacyFeatures::EXPORT_DATA),
    );

    assert_eq!(
        serde_json::to_value(&summary).expect("serialize"),
        json!({ "registered": ["crm.Lead"], "failed": ["crm.Nope"], "total": 2 })
    );
}

#[test]
fn redeclaring_a_feature_does_not_migrate_entities() {
    let mut catalog = EntityCatalog::new();
    catalog.insert(entity("crm", "Account"));
    let mut registry = FeatureRegistry::builder().resolver(catalog).build();

    assert!(registry.register_entity(("crm", "Account"), &FeatureRequest::new().all()));
    assert!(registry.declare_feature("search", None));
    assert_eq!(registry.entities_for("search_models"), [entity("crm", "Account")]);

    assert!(!registry.declare_feature("search", Some(RegistryKey::from("alt_search_models"))));

    assert_eq!(registry.entities_for("search_models"), [entity("crm", "Account")]);
    assert!(registry.entities_for("alt_search_models").is_empty());
    assert_eq!(
        registry.registry_key_for("search").map(RegistryKey::as_str),
        Some("alt_search_models")
    );
    assert!(matches!(
        registry.warnings(),
        [RegistryWarning::AlreadyDeclared { previous, current, .. }]
            if previous.as_str() == "search_models" && current.as_str() == "alt_search_models"
    ));
}

#[test]
fn registrations_after_a_redeclaration_use_the_new_key() {
    let mut registry = crm_registry();
    let _ = registry.declare("global_search", Some(RegistryKey::from("search_index")));

    assert!(
        registry.register_entity(("crm", "Lead"), &FeatureRequest::new().feature("global_search"))
    );
    assert_eq!(registry.entities_for("search_index"), [entity("crm", "Lead")]);
    assert!(registry.entities_for("global_search_models").is_empty());
    assert_eq!(registry.entities_for_feature("global_search"), [entity("crm", "Lead")]);
}

#[test]
fn unknown_registry_keys_yield_nothing() {
    let registry = crm_registry();
    assert!(registry.entities_for("no_such_models").is_empty());
    assert!(registry.entities_for_feature("no_such_feature").is_empty());
}

#[test]
fn unresolvable_references_report_not_found() {
    let mut registry = crm_registry();

    let err = registry
        .register(("crm", "Ghost"), &FeatureRequest::new().feature("import_data"))
        .expect_err("ghost is not in the catalog");
    assert!(matches!(err, RegistryError::NotFound { .. }));

    let err = registry
        .register_label("not-a-label", &FeatureRequest::new().feature("import_data"))
        .expect_err("labels need a dot");
    assert!(matches!(err, RegistryError::InvalidReference { .. }));

    assert!(registry.entities_for("import_models").is_empty());
}

#[test]
fn model_names_resolve_case_insensitively() {
    let mut registry = crm_registry();
    let registration = registry
        .register_label("crm.opportunity", &FeatureRequest::new().feature("export_data"))
        .expect("catalog lookups ignore model case");

    assert_eq!(registration.entity, entity("crm", "Opportunity"));
}

#[test]
fn features_keep_declaration_order() {
    let mut registry = crm_registry();
    let _ = registry.declare("report_choices", Some(RegistryKey::from("report_models")));
    let _ = registry.declare("activity_related", None);

    let declared: Vec<_> =
        registry.features().map(|(name, key)| (name.as_str(), key.as_str())).collect();
    assert_eq!(
        declared,
        [
            ("import_data", "import_models"),
            ("export_data", "export_models"),
            ("global_search", "global_search_models"),
            ("report_choices", "report_models"),
            ("activity_related", "activity_related_models"),
        ]
    );
}

#[test]
fn frozen_registries_share_one_snapshot() {
    let mut registry = crm_registry();
    let _ = registry.register_entity(("crm", "Lead"), &FeatureRequest::new().all());

    let shared = registry.freeze();
    let clone = shared.clone();

    assert_eq!(clone.entities_for("import_models"), [entity("crm", "Lead")]);
    assert_eq!(shared.summary(), clone.summary());
}

#[test]
fn summary_lists_members_pending_and_tracked_entities() {
    let mut registry = crm_registry();
    let _ = registry
        .register_entity(("crm", "Lead"), &FeatureRequest::new().all().excluding("import_data"));
    let _ = registry.register_entity(
        ("crm", "Contact"),
        &FeatureRequest::new().feature("dashboard_component"),
    );

    let summary = serde_json::to_value(registry.summary()).expect("serialize");

    assert_eq!(
        summary["features"][0],
        json!({ "name": "import_data", "registry_key": "import_models", "entities": [] })
    );
    assert_eq!(summary["features"][1]["entities"], json!(["crm.Lead"]));
    assert_eq!(summary["pending"], json!({ "dashboard_component": ["crm.Contact"] }));
    assert_eq!(
        summary["all_features"],
        json!([{ "entity": "crm.Lead", "exclude": ["import_data"] }])
    );
    assert_eq!(summary["warnings"], json!(1));
}

#[test]
fn explicit_pending_request_survives_a_later_all_features_exclusion() {
    let mut registry = crm_registry();
    let lead = entity("crm", "Lead");

    assert!(registry.register_entity(("crm", "Lead"), &FeatureRequest::new().feature("q")));
    assert!(registry.register_entity(("crm", "Lead"), &FeatureRequest::new().all().excluding("q")));
    assert_eq!(registry.pending_for("q"), [lead.clone()]);

    let _ = registry.declare("q", None);

    assert_eq!(registry.entities_for("q_models"), [lead]);
    assert!(registry.pending_for("q").is_empty());
}
