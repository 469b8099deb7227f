use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "tessera";

/// Prefix of environment overrides (`TESSERA__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "TESSERA";

/// Custom error type for config loading.
#[tessera_derive::tessera_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration by layering a file with environment overrides.
///
/// 1. **Base file**: `path` (TOML, JSON or YAML, extension optional). Without a path
///    the optional `tessera` file in the working directory is used, and a missing
///    file simply yields the defaults of `T`.
/// 2. **Environment**: variables prefixed with `TESSERA__`, nested with `__`
///    (`TESSERA__REGISTRY__COLLECT_ANNOTATIONS=false` maps to
///    `registry.collect_annotations`).
///
/// # Errors
/// Returns an error if an explicit file is missing, or if the merged sources do
/// not deserialize into `T`.
///
/// # Example
/// ```rust
/// use tessera_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
