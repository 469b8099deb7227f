use tessera_kernel::Platform;
use tessera_kernel::domain::config::{FeatureDecl, TesseraConfig};
use tessera_org::{Company, Department, Org, Role, User};
use tessera_registry::domain::Entity;

#[test]
fn org_entities_join_every_feature_but_dashboards_and_reports() {
    let platform = Platform::builder().plugin(tessera_org::init()).build().expect("bootstrap");
    let registry = &platform.registry;

    let members = [
        Company::entity_type(),
        Department::entity_type(),
        Role::entity_type(),
        User::entity_type(),
    ];
    for key in ["import_models", "export_models", "global_search_models"] {
        assert_eq!(registry.entities_for(key), members, "{key}");
    }

    for entity in &members {
        let excluded: Vec<_> = registry
            .exclusions_for(entity)
            .expect("tracked for future features")
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(excluded, ["dashboard_component", "report_choices"]);
    }
}

#[test]
fn later_features_reach_org_entities() {
    let mut config = TesseraConfig::default();
    config.registry.features.push(FeatureDecl::new("workflow", None));
    config.registry.features.push(FeatureDecl::new("dashboard_component", None));

    let platform = Platform::builder().config(config).plugin(Org).build().expect("bootstrap");

    assert_eq!(platform.registry.entities_for("workflow_models").len(), 4);
    assert!(platform.registry.entities_for("dashboard_component_models").is_empty());
}

#[test]
fn catalog_carries_verbose_names() {
    let platform = Platform::builder().plugin(Org).build().expect("bootstrap");

    let user = platform.catalog.entry(&User::entity_type()).expect("user is catalogued");
    assert_eq!(user.verbose_name, "user");
    let department = platform.catalog.get("org", "department").expect("case-insensitive lookup");
    assert_eq!(department.verbose_name, "department");
}
