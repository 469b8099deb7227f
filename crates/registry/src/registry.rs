use crate::declaration::{FeatureDeclaration, FeatureEnabled, declarations};
use crate::error::RegistryError;
use crate::outcome::{BatchSummary, Declaration, Registration, RegistryWarning};
use crate::request::FeatureRequest;
use crate::resolver::{EntityCatalog, EntityResolver};
use crate::summary::{AllFeaturesEntry, FeatureSummary, RegistrySummary};
use fxhash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Arc;
use tessera_domain::config::FeatureDecl;
use tessera_domain::constants::CORE_FEATURES;
use tessera_domain::{EntityRef, EntityType, FeatureName, RegistryKey};
use tracing::{debug, error, info, warn};

/// The feature registry.
///
/// Holds the declared features (in declaration order), the entities enrolled
/// under each registry key, the entities that asked for every feature, and the
/// entities waiting for features that are not declared yet.
#[derive(Debug)]
pub struct FeatureRegistry {
    resolver: Arc<dyn EntityResolver>,
    features: Vec<(FeatureName, RegistryKey)>,
    feature_index: FxHashMap<FeatureName, usize>,
    buckets: FxHashMap<RegistryKey, Vec<EntityType>>,
    all_features: Vec<(EntityType, BTreeSet<FeatureName>)>,
    pending: FxHashMap<FeatureName, Vec<EntityType>>,
    warnings: Vec<RegistryWarning>,
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FeatureRegistry {
    /// An empty registry resolving names against an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> FeatureRegistryBuilder {
        FeatureRegistryBuilder::default()
    }

    #[must_use]
    pub fn resolver(&self) -> &dyn EntityResolver {
        self.resolver.as_ref()
    }

    // --- Declaration ---

    /// Declares a feature; `registry_key` defaults to `{name}_models`.
    ///
    /// Returns `false` when the feature already existed. Its key is overwritten in
    /// that case, and entities enrolled under the previous key stay there.
    pub fn declare_feature(
        &mut self,
        name: impl Into<FeatureName>,
        registry_key: Option<RegistryKey>,
    ) -> bool {
        self.declare(name, registry_key).is_new()
    }

    /// Declares a feature and reports what happened.
    ///
    /// A new feature immediately receives every all-features entity that does not
    /// exclude it, followed by the entities that were waiting for it.
    pub fn declare(
        &mut self,
        name: impl Into<FeatureName>,
        registry_key: Option<RegistryKey>,
    ) -> Declaration {
        let name = name.into();
        let key = registry_key.unwrap_or_else(|| name.default_registry_key());

        if let Some(&position) = self.feature_index.get(&name) {
            let previous = std::mem::replace(&mut self.features[position].1, key.clone());
            warn!(
                feature = %name,
                previous = %previous,
                current = %key,
                "Feature is already declared, overwriting its registry key"
            );
            self.warnings.push(RegistryWarning::AlreadyDeclared {
                feature: name.clone(),
                previous: previous.clone(),
                current: key.clone(),
            });
            return Declaration::Redeclared { feature: name, previous, current: key };
        }

        self.feature_index.insert(name.clone(), self.features.len());
        self.features.push((name.clone(), key.clone()));
        info!(feature = %name, registry_key = %key, "Declared feature");

        let bucket = self.buckets.entry(key.clone()).or_default();

        let mut enrolled = 0;
        for (entity, excluded) in &self.all_features {
            if !excluded.contains(&name) && push_unique(bucket, entity) {
                debug!(
                    entity = %entity,
                    feature = %name,
                    "Enrolled all-features entity in new feature"
                );
                enrolled += 1;
            }
        }

        let mut resolved_pending = 0;
        for entity in self.pending.remove(&name).unwrap_or_default() {
            if push_unique(bucket, &entity) {
                debug!(
                    entity = %entity,
                    feature = %name,
                    "Enrolled entity that was waiting for feature"
                );
                resolved_pending += 1;
            }
        }

        Declaration::Declared { feature: name, registry_key: key, enrolled, resolved_pending }
    }

    // --- Registration ---

    /// Resolves a reference to an entity type.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] if a by-name reference is unknown to the resolver.
    pub fn resolve(&self, reference: &EntityRef) -> Result<EntityType, RegistryError> {
        match reference {
            EntityRef::Direct(entity) => Ok(entity.clone()),
            EntityRef::ByName { app_label, model_name } => {
                self.resolver.resolve(app_label, model_name)
            },
        }
    }

    /// Opts an entity into features and reports exactly what changed.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] when the reference cannot be resolved.
    /// The registry is left untouched in that case.
    pub fn register(
        &mut self,
        entity: impl Into<EntityRef>,
        request: &FeatureRequest,
    ) -> Result<Registration, RegistryError> {
        let entity = self.resolve(&entity.into())?;
        Ok(self.enroll(entity, request))
    }

    /// Opts an entity written as `app_label.ModelName` into features.
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidReference`] for malformed labels and
    /// [`RegistryError::NotFound`] for unknown entities.
    pub fn register_label(
        &mut self,
        label: &str,
        request: &FeatureRequest,
    ) -> Result<Registration, RegistryError> {
        let reference = EntityRef::parse(label)?;
        self.register(reference, request)
    }

    /// Best-effort form of [`FeatureRegistry::register`].
    ///
    /// Returns `true` when the entity is enrolled, waiting for a feature, or tracked
    /// for future features. Failures are logged and recorded as warnings.
    pub fn register_entity(
        &mut self,
        entity: impl Into<EntityRef>,
        request: &FeatureRequest,
    ) -> bool {
        self.register_reported(entity.into(), request).is_some_and(|r| r.is_effective())
    }

    /// Registers several entities with the same request.
    ///
    /// One failing entity never stops the rest of the batch.
    pub fn register_entities<I, E>(&mut self, entities: I, request: &FeatureRequest) -> BatchSummary
    where
        I: IntoIterator<Item = E>,
        E: Into<EntityRef>,
    {
        let mut summary = BatchSummary::default();

        for entity in entities {
            let reference: EntityRef = entity.into();
            summary.total += 1;
            let label = reference.to_string();
            match self.register_reported(reference, request) {
                Some(registration) if registration.is_effective() => {
                    summary.registered.push(registration.entity.to_string());
                },
                Some(registration) => summary.failed.push(registration.entity.to_string()),
                None => summary.failed.push(label),
            }
        }

        info!(
            registered = summary.registered.len(),
            failed = summary.failed.len(),
            total = summary.total,
            "Batch registration finished"
        );
        summary
    }

    /// Applies the `#[feature_enabled]` annotation of one entity type.
    pub fn annotate<T: FeatureEnabled>(&mut self) -> Registration {
        self.apply(&T::DECLARATION)
    }

    /// Applies a single annotation.
    pub fn apply(&mut self, declaration: &FeatureDeclaration) -> Registration {
        self.enroll(declaration.entity_type(), &declaration.request())
    }

    /// Applies every `#[feature_enabled]` annotation linked into the binary.
    ///
    /// Returns the number of annotations applied.
    pub fn apply_declarations(&mut self) -> usize {
        let found = declarations();
        for declaration in &found {
            self.apply(declaration);
        }
        info!(count = found.len(), "Applied feature annotations");
        found.len()
    }

    fn register_reported(
        &mut self,
        reference: EntityRef,
        request: &FeatureRequest,
    ) -> Option<Registration> {
        match self.resolve(&reference) {
            Ok(entity) => Some(self.enroll(entity, request)),
            Err(err) => {
                error!(entity = %reference, error = %err, "Entity registration failed");
                self.warnings.push(RegistryWarning::Unresolved {
                    reference: reference.to_string(),
                    reason: err.to_string(),
                });
                None
            },
        }
    }

    fn enroll(&mut self, entity: EntityType, request: &FeatureRequest) -> Registration {
        let mut enabled = request.requested().clone();

        if request.is_all() {
            self.track_all(&entity, request.excluded());
            enabled.extend(self.features.iter().map(|(name, _)| name.clone()));
        }
        enabled.retain(|name| !request.excluded().contains(name));

        let mut registration = Registration::new(entity, request.is_all());
        let entity = &registration.entity;

        if enabled.is_empty() {
            if !request.is_all() {
                warn!(entity = %entity, "No features specified for entity");
                self.warnings.push(RegistryWarning::NothingToRegister { entity: entity.clone() });
            }
            return registration;
        }

        let mut enrolled = Vec::new();
        let mut unchanged = Vec::new();
        let mut pending = Vec::new();

        for feature in enabled {
            let Some(key) = self.registry_key_for(feature.as_str()).cloned() else {
                push_unique(self.pending.entry(feature.clone()).or_default(), entity);
                warn!(
                    entity = %entity,
                    feature = %feature,
                    "Unknown feature, entity will be enrolled once it is declared"
                );
                self.warnings.push(RegistryWarning::UnknownFeature {
                    feature: feature.clone(),
                    entity: entity.clone(),
                });
                pending.push(feature);
                continue;
            };

            if push_unique(self.buckets.entry(key.clone()).or_default(), entity) {
                info!(entity = %entity, feature = %feature, "Registered entity for feature");
                enrolled.push((feature, key));
            } else {
                debug!(
                    entity = %entity,
                    feature = %feature,
                    "Entity already registered for feature"
                );
                unchanged.push((feature, key));
            }
        }

        registration.enrolled = enrolled;
        registration.unchanged = unchanged;
        registration.pending = pending;
        registration
    }

    fn track_all(&mut self, entity: &EntityType, excluded: &BTreeSet<FeatureName>) {
        if let Some((_, current)) = self.all_features.iter_mut().find(|(e, _)| e == entity) {
            current.clone_from(excluded);
        } else {
            self.all_features.push((entity.clone(), excluded.clone()));
        }
    }

    // --- Queries ---

    /// Entities registered under `registry_key`, in registration order.
    #[must_use]
    pub fn entities_for(&self, registry_key: &str) -> &[EntityType] {
        self.buckets.get(registry_key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Entities registered for `feature` under its current registry key.
    #[must_use]
    pub fn entities_for_feature(&self, feature: &str) -> &[EntityType] {
        self.registry_key_for(feature)
            .map(|key| self.entities_for(key.as_str()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn registry_key_for(&self, feature: &str) -> Option<&RegistryKey> {
        self.feature_index.get(feature).map(|&position| &self.features[position].1)
    }

    #[must_use]
    pub fn is_declared(&self, feature: &str) -> bool {
        self.feature_index.contains_key(feature)
    }

    /// Declared features with their current registry keys, in declaration order.
    pub fn features(&self) -> impl Iterator<Item = (&FeatureName, &RegistryKey)> {
        self.features.iter().map(|(name, key)| (name, key))
    }

    /// Entities waiting for `feature` to be declared.
    #[must_use]
    pub fn pending_for(&self, feature: &str) -> &[EntityType] {
        self.pending.get(feature).map(Vec::as_slice).unwrap_or_default()
    }

    /// All waiting entities, grouped by feature name in alphabetical order.
    #[must_use]
    pub fn pending(&self) -> BTreeMap<&FeatureName, &[EntityType]> {
        self.pending.iter().map(|(name, entities)| (name, entities.as_slice())).collect()
    }

    /// Entities tracked for every feature, with their exclusions.
    pub fn all_features(&self) -> impl Iterator<Item = (&EntityType, &BTreeSet<FeatureName>)> {
        self.all_features.iter().map(|(entity, excluded)| (entity, excluded))
    }

    #[must_use]
    pub fn exclusions_for(&self, entity: &EntityType) -> Option<&BTreeSet<FeatureName>> {
        self.all_features.iter().find(|(e, _)| e == entity).map(|(_, excluded)| excluded)
    }

    #[must_use]
    pub fn warnings(&self) -> &[RegistryWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            features: self
                .features
                .iter()
                .map(|(name, key)| FeatureSummary {
                    name: name.clone(),
                    registry_key: key.clone(),
                    entities: self.entities_for(key.as_str()).to_vec(),
                })
                .collect(),
            pending: self
                .pending()
                .into_iter()
                .map(|(name, entities)| (name.clone(), entities.to_vec()))
                .collect(),
            all_features: self
                .all_features
                .iter()
                .map(|(entity, excluded)| AllFeaturesEntry {
                    entity: entity.clone(),
                    exclude: excluded.iter().cloned().collect(),
                })
                .collect(),
            warnings: self.warnings.len(),
        }
    }

    /// Ends the registration phase.
    #[must_use]
    pub fn freeze(self) -> SharedRegistry {
        info!(
            features = self.features.len(),
            pending = self.pending.len(),
            warnings = self.warnings.len(),
            "Feature registry frozen"
        );
        SharedRegistry { inner: Arc::new(self) }
    }
}

fn push_unique(bucket: &mut Vec<EntityType>, entity: &EntityType) -> bool {
    if bucket.contains(entity) {
        false
    } else {
        bucket.push(entity.clone());
        true
    }
}

/// Read-only, cheaply cloneable handle to a populated registry.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<FeatureRegistry>,
}

impl Deref for SharedRegistry {
    type Target = FeatureRegistry;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Default)]
pub struct FeatureRegistryBuilder {
    resolver: Option<Arc<dyn EntityResolver>>,
    features: Vec<FeatureDecl>,
}

impl FeatureRegistryBuilder {
    #[must_use]
    pub fn resolver(mut self, resolver: impl EntityResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    #[must_use]
    pub fn shared_resolver(mut self, resolver: Arc<dyn EntityResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Declares `import_data`, `export_data` and `global_search` on build.
    #[must_use]
    pub fn core_features(mut self) -> Self {
        self.features.extend(CORE_FEATURES.iter().map(|(name, key)| {
            FeatureDecl::new(FeatureName::from_static(name), Some(RegistryKey::from_static(key)))
        }));
        self
    }

    #[must_use]
    pub fn feature(
        mut self,
        name: impl Into<FeatureName>,
        registry_key: Option<RegistryKey>,
    ) -> Self {
        self.features.push(FeatureDecl::new(name, registry_key));
        self
    }

    #[must_use]
    pub fn features<I>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = FeatureDecl>,
    {
        self.features.extend(features);
        self
    }

    #[must_use]
    pub fn build(self) -> FeatureRegistry {
        let resolver = self.resolver.unwrap_or_else(|| Arc::new(EntityCatalog::new()));
        let mut registry = FeatureRegistry {
            resolver,
            features: Vec::new(),
            feature_index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            all_features: Vec::new(),
            pending: FxHashMap::default(),
            warnings: Vec::new(),
        };

        for FeatureDecl { name, registry_key } in self.features {
            registry.declare(name, registry_key);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn lead() -> EntityType {
        EntityType::from_static("crm", "Lead")
    }

    #[test]
    #[traced_test]
    fn redeclaring_logs_a_warning() {
        let mut registry = FeatureRegistry::new();
        assert!(registry.declare_feature("workflow", None));
        assert!(!registry.declare_feature("workflow", Some(RegistryKey::from("flows"))));

        assert!(logs_contain("Feature is already declared"));
        assert_eq!(registry.registry_key_for("workflow").map(RegistryKey::as_str), Some("flows"));
    }

    #[test]
    #[traced_test]
    fn unknown_features_are_logged_and_deferred() {
        let mut registry = FeatureRegistry::new();
        let registration = registry
            .register(lead(), &FeatureRequest::new().feature("dashboard_component"))
            .expect("direct references always resolve");

        assert!(logs_contain("Unknown feature"));
        assert_eq!(registration.pending, [FeatureName::from("dashboard_component")]);
        assert_eq!(registry.pending_for("dashboard_component"), [lead()]);
        assert!(registry.entities_for("dashboard_component_models").is_empty());
    }

    #[test]
    #[traced_test]
    fn unresolved_references_are_logged_not_raised() {
        let mut registry = FeatureRegistry::builder().core_features().build();
        assert!(!registry.register_entity(("crm", "Ghost"), &FeatureRequest::new().all()));

        assert!(logs_contain("Entity registration failed"));
        assert!(matches!(registry.warnings(), [RegistryWarning::Unresolved { .. }]));
        assert!(registry.all_features().next().is_none(), "failed entities are not tracked");
    }

    #[test]
    fn empty_requests_warn_and_report_false() {
        let mut registry = FeatureRegistry::builder().core_features().build();
        assert!(!registry.register_entity(lead(), &FeatureRequest::new()));
        assert!(matches!(registry.warnings(), [RegistryWarning::NothingToRegister { .. }]));
    }

    #[test]
    fn all_features_before_any_declaration_is_still_tracked() {
        let mut registry = FeatureRegistry::new();
        let registration =
            registry.register(lead(), &FeatureRequest::new().all()).expect("direct reference");

        assert!(registration.tracks_all);
        assert!(registration.is_effective());
        assert!(registry.exclusions_for(&lead()).is_some_and(BTreeSet::is_empty));
    }

    #[test]
    fn re_registering_with_all_replaces_exclusions() {
        let mut registry = FeatureRegistry::new();
        let _ = registry.register(lead(), &FeatureRequest::new().all().excluding("import_data"));
        let _ = registry.register(lead(), &FeatureRequest::new().all().excluding("export_data"));

        let excluded: Vec<_> = registry
            .exclusions_for(&lead())
            .map(|set| set.iter().map(FeatureName::as_str).collect())
            .unwrap_or_default();
        assert_eq!(excluded, ["export_data"]);
        assert_eq!(registry.all_features().count(), 1);
    }
}
