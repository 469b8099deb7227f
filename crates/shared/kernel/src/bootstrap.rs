use crate::plugin::FeaturePlugin;
use fxhash::FxHashSet;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use tessera_domain::config::TesseraConfig;
use tessera_registry::{EntityCatalog, FeatureRegistry, FeatureRequest, SharedRegistry};
use tracing::{debug, info};

#[tessera_derive::tessera_error]
pub enum BootstrapError {
    #[error("Bootstrap validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct PlatformInner {
    pub config: TesseraConfig,
    pub catalog: Arc<EntityCatalog>,
    pub registry: SharedRegistry,
    plugins: Vec<&'static str>,
}

/// A fully bootstrapped platform: catalog plus frozen feature registry.
#[derive(Debug, Clone)]
pub struct Platform {
    inner: Arc<PlatformInner>,
}

impl Platform {
    #[must_use]
    pub fn builder() -> Bootstrap {
        Bootstrap::default()
    }

    /// Names of the plugins that ran, in order.
    #[must_use]
    pub fn plugins(&self) -> &[&'static str] {
        &self.inner.plugins
    }
}

impl Deref for Platform {
    type Target = PlatformInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Builds a [`Platform`] from configuration and feature plugins.
///
/// Population order:
/// 1. core features from `registry.core_features`;
/// 2. entity types of every plugin;
/// 3. plugin registrations, in plugin order;
/// 4. extra features from `registry.features`;
/// 5. manifest registrations from `registry.registrations`;
/// 6. `#[feature_enabled]` annotations, unless `registry.collect_annotations` is off.
#[derive(Debug, Default)]
pub struct Bootstrap {
    config: Option<TesseraConfig>,
    catalog: EntityCatalog,
    plugins: Vec<Box<dyn FeaturePlugin>>,
}

impl Bootstrap {
    #[must_use]
    pub fn config(mut self, config: TesseraConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Starts from a catalog that already holds entity types.
    #[must_use]
    pub fn catalog(mut self, catalog: EntityCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn plugin(mut self, plugin: impl FeaturePlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Registers multiple plugins at once.
    #[must_use]
    pub fn plugins<I>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn FeaturePlugin>>,
    {
        self.plugins.extend(plugins);
        self
    }

    /// Runs every registration phase and freezes the registry.
    ///
    /// # Errors
    /// Returns [`BootstrapError::Validation`] when two plugins share a name.
    /// Registration problems never fail the bootstrap; they end up in the
    /// registry's warnings.
    pub fn build(self) -> Result<Platform, BootstrapError> {
        let Self { config, mut catalog, plugins } = self;
        let config = config.unwrap_or_default();

        let mut seen = FxHashSet::default();
        for plugin in &plugins {
            if !seen.insert(plugin.name()) {
                return Err(BootstrapError::Validation {
                    message: format!("Plugin '{}' is registered twice", plugin.name()).into(),
                    context: Some("Plugin names must be unique".into()),
                });
            }
        }

        for plugin in &plugins {
            plugin.entities(&mut catalog);
            debug!(plugin = plugin.name(), entities = catalog.len(), "Plugin contributed entities");
        }
        let catalog = Arc::new(catalog);

        let settings = &config.registry;
        let mut registry = FeatureRegistry::builder()
            .shared_resolver(catalog.clone())
            .features(settings.core_features.iter().cloned())
            .build();

        for plugin in &plugins {
            plugin.register(&mut registry);
            info!(plugin = plugin.name(), "Plugin registered");
        }

        for feature in &settings.features {
            registry.declare_feature(feature.name.clone(), feature.registry_key.clone());
        }

        for registration in &settings.registrations {
            let request = FeatureRequest::from(registration);
            registry.register_entities(registration.entities.iter().cloned(), &request);
        }

        let annotations =
            if settings.collect_annotations { registry.apply_declarations() } else { 0 };

        info!(
            plugins = plugins.len(),
            entities = catalog.len(),
            features = registry.features().count(),
            annotations,
            warnings = registry.warnings().len(),
            "Platform bootstrapped"
        );

        let names = plugins.iter().map(|plugin| plugin.name()).collect();
        Ok(Platform {
            inner: Arc::new(PlatformInner {
                config,
                catalog,
                registry: registry.freeze(),
                plugins: names,
            }),
        })
    }
}
