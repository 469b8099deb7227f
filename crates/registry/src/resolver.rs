use crate::error::RegistryError;
use fxhash::FxHashMap;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;
use tessera_domain::entity::humanize;
use tessera_domain::{Entity, EntityType};

/// Looks up an entity type by its two-part key.
pub trait EntityResolver: Debug + Send + Sync {
    /// # Errors
    /// Returns [`RegistryError::NotFound`] when no such entity type exists.
    fn resolve(&self, app_label: &str, model_name: &str) -> Result<EntityType, RegistryError>;
}

impl<T: EntityResolver + ?Sized> EntityResolver for Arc<T> {
    fn resolve(&self, app_label: &str, model_name: &str) -> Result<EntityType, RegistryError> {
        (**self).resolve(app_label, model_name)
    }
}

/// An entity type known to the catalog, with its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub entity: EntityType,
    pub verbose_name: Cow<'static, str>,
}

/// In-memory entity catalog, the default [`EntityResolver`].
///
/// Model names are matched case-insensitively; app labels exactly.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entries: Vec<CatalogEntry>,
    index: FxHashMap<String, usize>,
}

impl EntityCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity type defined in code.
    pub fn register<T: Entity>(&mut self) -> &mut Self {
        self.insert_with_name(T::entity_type(), T::verbose_name())
    }

    /// Adds an entity type with a verbose name derived from its model name.
    pub fn insert(&mut self, entity: EntityType) -> &mut Self {
        let verbose_name = Cow::Owned(humanize(entity.model_name()));
        self.insert_with_name(entity, verbose_name)
    }

    /// Adds (or replaces) an entity type with an explicit verbose name.
    pub fn insert_with_name(
        &mut self,
        entity: EntityType,
        verbose_name: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        let entry = CatalogEntry { entity, verbose_name: verbose_name.into() };
        let key = entry.entity.lookup_key();

        if let Some(&position) = self.index.get(&key) {
            self.entries[position] = entry;
        } else {
            self.index.insert(key, self.entries.len());
            self.entries.push(entry);
        }
        self
    }

    #[must_use]
    pub fn get(&self, app_label: &str, model_name: &str) -> Option<&CatalogEntry> {
        let key = format!("{app_label}.{}", model_name.to_lowercase());
        self.index.get(&key).map(|&position| &self.entries[position])
    }

    #[must_use]
    pub fn entry(&self, entity: &EntityType) -> Option<&CatalogEntry> {
        self.get(entity.app_label(), entity.model_name())
    }

    #[must_use]
    pub fn contains(&self, entity: &EntityType) -> bool {
        self.entry(entity).is_some()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl EntityResolver for EntityCatalog {
    fn resolve(&self, app_label: &str, model_name: &str) -> Result<EntityType, RegistryError> {
        self.get(app_label, model_name).map(|entry| entry.entity.clone()).ok_or_else(|| {
            RegistryError::NotFound {
                message: format!("{app_label}.{model_name}").into(),
                context: Some("Entity catalog lookup".into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_model_name_case() {
        let mut catalog = EntityCatalog::new();
        catalog.insert(EntityType::from_static("crm", "OpportunityStage"));

        let entity = catalog.resolve("crm", "opportunitystage").expect("case-insensitive match");
        assert_eq!(entity.model_name(), "OpportunityStage");
        assert!(catalog.resolve("CRM", "OpportunityStage").is_err(), "app labels match exactly");
    }

    #[test]
    fn reinserting_replaces_the_entry_in_place() {
        let mut catalog = EntityCatalog::new();
        catalog.insert(EntityType::from_static("crm", "Lead"));
        catalog.insert(EntityType::from_static("crm", "Contact"));
        catalog.insert_with_name(EntityType::from_static("crm", "Lead"), "sales lead");

        assert_eq!(catalog.len(), 2);
        let first = catalog.iter().next().expect("entry");
        assert_eq!(first.verbose_name, "sales lead");
    }

    #[test]
    fn missing_entities_report_not_found() {
        let catalog = EntityCatalog::new();
        let err = catalog.resolve("crm", "Ghost").expect_err("empty catalog");

        assert!(matches!(err, RegistryError::NotFound { .. }));
        assert_eq!(err.to_string(), "Entity not found (Entity catalog lookup): crm.Ghost");
    }
}
