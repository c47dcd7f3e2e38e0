use std::sync::Arc;

use crate::collection::operation::CollectionOperations;
use crate::collection::{Document, OperationResult};
use crate::errors::RepoResult;
use crate::filter::Filter;
use crate::repository_builder::RepositoryBuilder;
use crate::repository_config::RepositoryConfig;
use crate::store::{EntityStore, FileStore};
use crate::ENTITY_LOCKS;

/// An embedded document repository.
///
/// A repository exposes the four operations on named entity collections:
/// [add](Repository::add), [get](Repository::get),
/// [update](Repository::update) and [delete](Repository::delete). Each
/// operation loads the entity's collection, computes the result and, for
/// writes, persists the whole collection again, all while holding the
/// entity's lock. Repositories that resolve an entity to the same file share
/// that lock within the process.
///
/// `Repository` is cheap to clone; all clones share the same store.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
/// use jsonrepo::filter::{all, field};
/// use jsonrepo::repository::Repository;
///
/// let repository = Repository::builder().in_memory().open().unwrap();
/// repository.add("users", vec![
///     doc! { name: "Anna", city: "Rome", age: 30 },
///     doc! { name: "Bob", city: "Turin", age: 20 },
/// ]).unwrap();
///
/// let adults = repository.get("users", &field("age").gte(25)).unwrap();
/// assert_eq!(adults.count(), 1);
///
/// repository.update("users", &doc! { city: "Milan" }, &field("name").eq("Bob")).unwrap();
/// repository.delete("users", &field("city").eq("Rome")).unwrap();
/// assert_eq!(repository.get("users", &all()).unwrap().count(), 1);
/// ```
#[derive(Clone)]
pub struct Repository {
    inner: Arc<RepositoryInner>,
}

impl Repository {
    /// Returns a builder for configuring a repository.
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::new()
    }

    /// Opens a file backed repository with the given configuration.
    pub fn open(config: RepositoryConfig) -> Repository {
        let store = EntityStore::new(FileStore::new(&config));
        Repository::new(config, store)
    }

    pub(crate) fn new(config: RepositoryConfig, store: EntityStore) -> Self {
        Repository {
            inner: Arc::new(RepositoryInner { config, store }),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.inner.store
    }

    /// Adds documents to an entity.
    ///
    /// Documents without an `_id` get a generated UUID. The batch is
    /// rejected as a whole with a `DuplicateKey` error when one of its ids
    /// already exists or repeats, and with a `ValidationError` when an id is
    /// not a string.
    pub fn add(&self, entity: &str, documents: Vec<Document>) -> RepoResult<OperationResult> {
        self.inner.operations(entity)?.insert(documents)
    }

    /// Returns the documents of an entity that match the filter.
    ///
    /// [all](crate::filter::all) returns the whole collection.
    pub fn get(&self, entity: &str, filter: &Filter) -> RepoResult<OperationResult> {
        self.inner.operations(entity)?.find(filter)
    }

    /// Shallow-merges `update` into the matching documents of an entity.
    ///
    /// The unconditional filter is rejected with a `ValidationError`, and
    /// `_id`s are never changed.
    pub fn update(
        &self,
        entity: &str,
        update: &Document,
        filter: &Filter,
    ) -> RepoResult<OperationResult> {
        self.inner.operations(entity)?.update(update, filter)
    }

    /// Deletes the matching documents of an entity.
    ///
    /// The unconditional filter is rejected with a `ValidationError`.
    pub fn delete(&self, entity: &str, filter: &Filter) -> RepoResult<OperationResult> {
        self.inner.operations(entity)?.remove(filter)
    }
}

struct RepositoryInner {
    config: RepositoryConfig,
    store: EntityStore,
}

impl RepositoryInner {
    fn operations(&self, entity: &str) -> RepoResult<CollectionOperations> {
        CollectionOperations::new(entity, self.store.clone(), &ENTITY_LOCKS)
    }
}
