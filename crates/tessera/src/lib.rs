//! Facade crate for Tessera feature slices and shared modules.
//! Re-exports domain/kernel/registry primitives and aggregates slice plugins.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `tessera` with the desired slice flags (`org`/`crm`/`insights`, or `full`).
//! - Call [`init`] with the loaded configuration to bootstrap every enabled slice.

pub use tessera_domain as domain;
pub use tessera_kernel as kernel;
pub use tessera_registry as registry;

use tessera_domain::config::TesseraConfig;
use tessera_kernel::{BootstrapError, FeaturePlugin, Platform};

/// Slices compiled into this build.
pub mod features {
    #[cfg(feature = "crm")]
    pub use tessera_crm as crm;
    #[cfg(feature = "insights")]
    pub use tessera_insights as insights;
    #[cfg(feature = "org")]
    pub use tessera_org as org;

    /// Build-time enabled slices (by Cargo feature), in bootstrap order.
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "org")]
        "org",
        #[cfg(feature = "crm")]
        "crm",
        #[cfg(feature = "insights")]
        "insights",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Plugins of every enabled slice, in bootstrap order.
#[must_use]
pub fn plugins() -> Vec<Box<dyn FeaturePlugin>> {
    #[allow(unused_mut, clippy::vec_init_then_push)]
    let mut plugins: Vec<Box<dyn FeaturePlugin>> = Vec::new();

    #[cfg(feature = "org")]
    plugins.push(Box::new(features::org::init()));

    #[cfg(feature = "crm")]
    plugins.push(Box::new(features::crm::init()));

    #[cfg(feature = "insights")]
    plugins.push(Box::new(features::insights::init()));

    plugins
}

/// Bootstraps every enabled slice.
///
/// # Errors
/// Returns an error if the plugin set fails validation.
pub fn init(config: TesseraConfig) -> Result<Platform, BootstrapError> {
    Platform::builder().config(config).plugins(plugins()).build()
}
