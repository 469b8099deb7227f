//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the plugin contract, the platform
//! bootstrap and read-side helpers over the feature registry.
//!
//! ## Bootstrapping
//! ```rust
//! use tessera_kernel::{FeaturePlugin, Platform};
//! use tessera_kernel::registry::{EntityCatalog, FeatureRegistry, FeatureRequest};
//! use tessera_kernel::registry::domain::EntityType;
//!
//! #[derive(Debug)]
//! struct Crm;
//!
//! impl FeaturePlugin for Crm {
//!     fn name(&self) -> &'static str {
//!         "crm"
//!     }
//!
//!     fn entities(&self, catalog: &mut EntityCatalog) {
//!         catalog.insert(EntityType::from_static("crm", "Lead"));
//!     }
//!
//!     fn register(&self, registry: &mut FeatureRegistry) {
//!         registry.register_entity(("crm", "Lead"), &FeatureRequest::new().all());
//!     }
//! }
//!
//! let platform = Platform::builder().plugin(Crm).build().unwrap();
//! assert_eq!(platform.registry.entities_for("import_models").len(), 1);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use tessera_kernel::config::load_config;
//! use tessera_kernel::domain::config::TesseraConfig;
//!
//! let cfg: TesseraConfig = load_config(Some("tessera.toml")).unwrap();
//! ```
pub mod bootstrap;
pub mod choices;
pub mod config;
pub mod plugin;

pub use crate::bootstrap::{Bootstrap, BootstrapError, BootstrapErrorExt, Platform};
pub use crate::choices::{Choice, choices_for};
pub use crate::plugin::FeaturePlugin;

pub use tessera_domain as domain;
pub use tessera_registry as registry;
