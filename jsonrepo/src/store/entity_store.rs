use std::ops::Deref;
use std::sync::Arc;

use crate::collection::{Collection, Document};
use crate::errors::RepoResult;

/// Low-level interface of an entity collection backend.
///
/// # Contract
///
/// - `load` returns the whole collection in stored order. An absent entity
///   is created empty when the backend is configured to auto-create, and is
///   a `NotFound` error otherwise. A stored collection that is not a
///   sequence of documents is a `ParseError`.
/// - `persist` replaces the whole collection. Partial writes must never be
///   observable by a later `load`.
/// - `lock_key` names the storage location of an entity. Two stores that
///   return the same key for an entity share that entity's exclusive
///   section.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`; one store is shared by every thread
/// using the repository.
pub trait EntityStoreProvider: Send + Sync {
    /// Loads the full collection of an entity.
    fn load(&self, entity: &str) -> RepoResult<Collection>;

    /// Replaces the full collection of an entity.
    fn persist(&self, entity: &str, documents: &[Document]) -> RepoResult<()>;

    /// Returns the key under which operations on the entity are serialized.
    fn lock_key(&self, entity: &str) -> RepoResult<String>;
}

/// A shared handle to an [EntityStoreProvider].
///
/// Cloning only increments a reference count, so every clone talks to the
/// same backend.
#[derive(Clone)]
pub struct EntityStore {
    inner: Arc<dyn EntityStoreProvider>,
}

impl EntityStore {
    /// Wraps a concrete backend.
    pub fn new<T: EntityStoreProvider + 'static>(inner: T) -> Self {
        EntityStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for EntityStore {
    type Target = Arc<dyn EntityStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
