#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace:
//!
//! * [`macro@tessera_error`] turns an enum into a context-aware error type.
//! * [`macro@Entity`] gives a struct a stable entity identity (`app_label.ModelName`).
//! * [`macro@feature_enabled`] opts an entity into registry features at definition time.
//!
//! The entity macros expand to paths under `::tessera_registry`, so consuming crates
//! must depend on `tessera-registry`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source`
///   field (or a field marked `#[source]`/`#[from]`), enabling the `?` operator.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` if an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants wrapping a source error must also carry
///    `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[tessera_derive::tessera_error]
/// pub enum CatalogError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, CatalogError> {
///     std::fs::read_to_string("catalog.toml").context("Reading catalog")
/// }
/// ```
#[proc_macro_attribute]
pub fn tessera_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Derives `tessera_registry::domain::Entity` for a struct.
///
/// # Attributes
///
/// * `app_label = "crm"` (required) - the owning application.
/// * `model_name = "Lead"` - defaults to the struct name.
/// * `verbose_name = "Sales Lead"` - defaults to the humanized model name.
///
/// # Example
///
/// ```rust,ignore
/// use tessera_registry::Entity;
///
/// #[derive(Entity)]
/// #[entity(app_label = "crm", verbose_name = "Sales Lead")]
/// pub struct Lead;
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::entity::expand(input).into()
}

/// Opts an entity type into registry features where it is defined.
///
/// The struct is emitted unchanged. The macro implements
/// `tessera_registry::FeatureEnabled` for it and submits the declaration to the
/// link-time collection applied by `FeatureRegistry::apply_declarations`.
///
/// # Arguments
///
/// * `all` / `all = true` - every current and future feature.
/// * `exclude = ["import_data"]` - features to leave out (a single string is accepted).
/// * `features = ["global_search"]` - explicit feature names.
/// * `some_feature` / `some_feature = true` - free-form flags; `= false` is ignored.
///
/// # Example
///
/// ```rust,ignore
/// use tessera_registry::{Entity, feature_enabled};
///
/// #[feature_enabled(all, exclude = ["dashboard_component"])]
/// #[derive(Entity)]
/// #[entity(app_label = "crm")]
/// pub struct Account;
///
/// #[feature_enabled(global_search, dashboard_component = true)]
/// #[derive(Entity)]
/// #[entity(app_label = "insights")]
/// pub struct DashboardFolder;
/// ```
#[proc_macro_attribute]
pub fn feature_enabled(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::feature::expand(args.into(), input).into()
}
