use tessera_insights::{
    ACTIVITY_RELATED_MODELS, Activity, DASHBOARD_COMPONENT_MODELS, DashboardFolder, Insights,
    REPORT_MODELS, Report, ReportFolder,
};
use tessera_kernel::Platform;
use tessera_kernel::domain::Entity;

#[test]
fn declares_insight_features() {
    let platform = Platform::builder().plugin(tessera_insights::init()).build().expect("bootstrap");

    let declared: Vec<_> =
        platform.registry.features().map(|(name, key)| (name.as_str(), key.as_str())).collect();
    assert_eq!(
        declared[3..],
        [
            ("report_choices", REPORT_MODELS),
            ("dashboard_component", DASHBOARD_COMPONENT_MODELS),
            ("activity_related", ACTIVITY_RELATED_MODELS),
        ]
    );
    assert!(platform.registry.entities_for(REPORT_MODELS).is_empty());
    assert!(platform.registry.entities_for(ACTIVITY_RELATED_MODELS).is_empty());
}

#[test]
fn insight_entities_are_searchable() {
    let platform = Platform::builder().plugin(Insights).build().expect("bootstrap");
    let registry = &platform.registry;

    assert_eq!(
        registry.entities_for("import_models"),
        [ReportFolder::entity_type(), Report::entity_type()]
    );
    assert_eq!(
        registry.entities_for("global_search_models"),
        [
            ReportFolder::entity_type(),
            Report::entity_type(),
            DashboardFolder::entity_type(),
            Activity::entity_type(),
        ]
    );
    assert_eq!(registry.entities_for(DASHBOARD_COMPONENT_MODELS), [Activity::entity_type()]);
}
