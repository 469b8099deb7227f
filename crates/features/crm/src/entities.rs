use tessera_registry::{Entity, feature_enabled};

pub const APP_LABEL: &str = "crm";

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct Lead {
    pub title: String,
    pub email: Option<String>,
    pub status: Option<String>,
}

#[feature_enabled(import_data, export_data, global_search)]
#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm", verbose_name = "lead status")]
pub struct LeadStatus {
    pub name: String,
    pub order: u16,
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub account: Option<String>,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct Account {
    pub name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct Campaign {
    pub name: String,
    pub budget: Option<u64>,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct Opportunity {
    pub name: String,
    pub amount: Option<u64>,
    pub stage: Option<String>,
}

#[feature_enabled(import_data, export_data, global_search)]
#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct OpportunityStage {
    pub name: String,
    pub probability: u8,
}

#[feature_enabled(global_search)]
#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct OpportunityTeam {
    pub name: String,
    pub owner: Option<String>,
}

#[feature_enabled(report_choices)]
#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct OpportunitySplit {
    pub opportunity: String,
    pub percentage: u8,
}

#[feature_enabled(import_data, export_data)]
#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "crm")]
pub struct ForecastType {
    pub name: String,
    pub period: Option<String>,
}
