use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::collection::{Collection, Document};
use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::repository_config::RepositoryConfig;

use super::{validate_entity_name, EntityStoreProvider};

/// In-memory entity store.
///
/// Collections live in process memory and are lost when the last clone of
/// the store is dropped. Entity names are validated like file entity names
/// and absent entities follow the same auto-create rule as the file store.
/// With backups enabled the collection replaced by each persist is kept and
/// can be read back with [MemoryStore::backup].
///
/// Every store instance has its own lock namespace, so two memory stores
/// never serialize each other's operations.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl MemoryStore {
    /// Creates a store that auto-creates entities and keeps no backups.
    pub fn new() -> Self {
        Self::with_config(&RepositoryConfig::default())
    }

    /// Creates a store using the `backup` and `autoCreateEntity` settings
    /// of the configuration.
    pub fn with_config(config: &RepositoryConfig) -> Self {
        MemoryStore {
            inner: Arc::new(MemoryStoreInner {
                id: Uuid::new_v4().to_string(),
                entities: RwLock::new(HashMap::new()),
                backups: RwLock::new(HashMap::new()),
                backup: config.backup(),
                auto_create_entity: config.auto_create_entity(),
            }),
        }
    }

    /// Returns the collection replaced by the last persist of the entity.
    pub fn backup(&self, entity: &str) -> Option<Vec<Document>> {
        self.inner.backups.read().get(entity).cloned()
    }

    /// Returns whether the entity has been created.
    pub fn contains_entity(&self, entity: &str) -> bool {
        self.inner.entities.read().contains_key(entity)
    }

    /// Returns the names of all created entities, sorted.
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.entities.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStoreProvider for MemoryStore {
    fn load(&self, entity: &str) -> RepoResult<Collection> {
        self.inner.load(entity)
    }

    fn persist(&self, entity: &str, documents: &[Document]) -> RepoResult<()> {
        self.inner.persist(entity, documents)
    }

    fn lock_key(&self, entity: &str) -> RepoResult<String> {
        validate_entity_name(entity)?;
        Ok(format!("memory:{}:{}", self.inner.id, entity))
    }
}

struct MemoryStoreInner {
    id: String,
    entities: RwLock<HashMap<String, Vec<Document>>>,
    backups: RwLock<HashMap<String, Vec<Document>>>,
    backup: bool,
    auto_create_entity: bool,
}

impl MemoryStoreInner {
    fn load(&self, entity: &str) -> RepoResult<Collection> {
        validate_entity_name(entity)?;

        if let Some(documents) = self.entities.read().get(entity) {
            return Ok(documents.clone());
        }

        if !self.auto_create_entity {
            log::error!("Entity '{}' does not exist in memory store {}", entity, self.id);
            return Err(RepoError::new(
                &format!("Entity '{}' does not exist", entity),
                ErrorKind::NotFound,
            ));
        }

        log::debug!("Creating entity '{}' in memory store {}", entity, self.id);
        let mut entities = self.entities.write();
        Ok(entities.entry(entity.to_string()).or_default().clone())
    }

    fn persist(&self, entity: &str, documents: &[Document]) -> RepoResult<()> {
        validate_entity_name(entity)?;

        let previous = self
            .entities
            .write()
            .insert(entity.to_string(), documents.to_vec());

        if self.backup {
            if let Some(previous) = previous {
                self.backups.write().insert(entity.to_string(), previous);
            }
        }

        log::debug!(
            "Persisted {} document(s) to entity '{}' in memory store {}",
            documents.len(),
            entity,
            self.id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_auto_create() {
        let store = MemoryStore::new();
        assert!(!store.contains_entity("users"));
        assert!(store.load("users").unwrap().is_empty());
        assert!(store.contains_entity("users"));
        assert_eq!(store.entity_names(), vec!["users".to_string()]);
    }

    #[test]
    fn test_missing_entity_without_auto_create() {
        let mut config = RepositoryConfig::new();
        config.set_auto_create_entity(false);
        let store = MemoryStore::with_config(&config);

        let err = store.load("users").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFound);
        assert!(!store.contains_entity("users"));

        store.persist("users", &[doc! { "_id": "1" }]).unwrap();
        assert_eq!(store.load("users").unwrap().len(), 1);
    }

    #[test]
    fn test_persist_replaces_collection() {
        let store = MemoryStore::new();
        store.persist("users", &[doc! { "_id": "1" }, doc! { "_id": "2" }]).unwrap();
        store.persist("users", &[doc! { "_id": "3" }]).unwrap();
        assert_eq!(store.load("users").unwrap(), vec![doc! { "_id": "3" }]);
    }

    #[test]
    fn test_backup_snapshot() {
        let mut config = RepositoryConfig::new();
        config.set_backup(true);
        let store = MemoryStore::with_config(&config);

        store.persist("users", &[doc! { "_id": "1" }]).unwrap();
        assert!(store.backup("users").is_none());

        store.persist("users", &[doc! { "_id": "2" }]).unwrap();
        assert_eq!(store.backup("users"), Some(vec![doc! { "_id": "1" }]));

        let plain = MemoryStore::new();
        plain.persist("users", &[doc! { "_id": "1" }]).unwrap();
        plain.persist("users", &[]).unwrap();
        assert!(plain.backup("users").is_none());
    }

    #[test]
    fn test_invalid_entity_names() {
        let store = MemoryStore::new();
        assert_eq!(store.load("").unwrap_err().kind(), &ErrorKind::ValidationError);
        assert_eq!(
            store.persist("../x", &[]).unwrap_err().kind(),
            &ErrorKind::ValidationError
        );
        assert_eq!(store.lock_key("/abs").unwrap_err().kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_lock_keys_are_per_instance() {
        let first = MemoryStore::new();
        let second = MemoryStore::new();
        assert_ne!(first.lock_key("users").unwrap(), second.lock_key("users").unwrap());
        assert_eq!(
            first.lock_key("users").unwrap(),
            first.clone().lock_key("users").unwrap()
        );
    }
}
