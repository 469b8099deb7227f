use tessera_registry::Entity;

pub const APP_LABEL: &str = "org";

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "org")]
pub struct Company {
    pub name: String,
    pub currency: String,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "org")]
pub struct Department {
    pub name: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "org")]
pub struct Role {
    pub name: String,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, Entity)]
#[entity(app_label = "org", verbose_name = "user")]
pub struct User {
    pub username: String,
    pub department: Option<String>,
    pub role: Option<String>,
}
