use tessera_registry::{Entity, feature_enabled};

pub const APP_LABEL: &str = "insights";

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "insights")]
pub struct ReportFolder {
    pub name: String,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "insights")]
pub struct Report {
    pub name: String,
    pub folder: Option<String>,
    /// `app_label.modelname` of the reported entity, one of the `report_models` choices.
    pub module: String,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "insights")]
pub struct DashboardFolder {
    pub name: String,
}

#[feature_enabled(global_search, dashboard_component)]
#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "insights")]
pub struct Activity {
    pub subject: String,
    /// `app_label.modelname` of the related entity, one of the `activity_related` choices.
    pub related_to: Option<String>,
}
