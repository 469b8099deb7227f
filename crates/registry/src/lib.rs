//! # Feature Registry
//!
//! Lets independently loaded slices opt their entity types into cross-cutting
//! features (import/export, global search, dashboards, ...) without central
//! coordination.
//!
//! * Features are declared with a registry key; entities are enrolled under that key.
//! * Entities may ask for *every* feature, current and future, minus an exclusion list.
//! * Entities may reference features that are not declared yet; they wait until the
//!   feature appears.
//! * Nothing here fails start-up: problems are logged, recorded in
//!   [`FeatureRegistry::warnings`], and reported through return values.
//!
//! Registration runs sequentially through `&mut FeatureRegistry`; afterwards the
//! registry is frozen into a read-only [`SharedRegistry`].
//!
//! ## Example
//!
//! ```rust
//! use tessera_registry::{EntityCatalog, FeatureRegistry, FeatureRequest};
//! use tessera_registry::domain::EntityType;
//!
//! let account = EntityType::from_static("crm", "Account");
//! let mut catalog = EntityCatalog::new();
//! catalog.insert(account.clone());
//!
//! let mut registry = FeatureRegistry::builder().resolver(catalog).build();
//! assert!(registry.register_entity(("crm", "Account"), &FeatureRequest::new().all()));
//!
//! assert!(registry.declare_feature("search", None));
//! assert_eq!(registry.entities_for("search_models"), [account]);
//! ```

mod declaration;
mod error;
mod outcome;
mod registry;
mod request;
mod resolver;
mod summary;

pub use crate::declaration::{FeatureDeclaration, FeatureEnabled, declarations};
pub use crate::error::{RegistryError, RegistryErrorExt};
pub use crate::outcome::{BatchSummary, Declaration, Registration, RegistryWarning};
pub use crate::registry::{FeatureRegistry, FeatureRegistryBuilder, SharedRegistry};
pub use crate::request::FeatureRequest;
pub use crate::resolver::{CatalogEntry, EntityCatalog, EntityResolver};
pub use crate::summary::{AllFeaturesEntry, FeatureSummary, RegistrySummary};

pub use inventory;
pub use tessera_derive::{Entity, feature_enabled};
pub use tessera_domain as domain;
pub use tessera_domain::Entity;
