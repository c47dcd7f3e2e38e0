use super::{
    operation_result::OperationResult, read_operations::ReadOperations,
    write_operations::WriteOperations,
};
use crate::collection::Document;
use crate::common::{LockHandle, LockRegistry};
use crate::errors::RepoResult;
use crate::filter::Filter;
use crate::store::EntityStore;

/// All operations of one entity, serialized through the entity's lock.
///
/// The lock is looked up by the store's lock key, so every
/// `CollectionOperations` built for the same storage location from the same
/// registry excludes the others while it loads, computes and persists.
pub(crate) struct CollectionOperations {
    lock: LockHandle,
    read_operations: ReadOperations,
    write_operations: WriteOperations,
}

impl CollectionOperations {
    pub fn new(entity: &str, store: EntityStore, lock_registry: &LockRegistry) -> RepoResult<Self> {
        let lock_key = store.lock_key(entity)?;
        let lock = lock_registry.get_lock(&lock_key);

        let read_operations = ReadOperations::new(entity.to_string(), store.clone());
        let write_operations = WriteOperations::new(entity.to_string(), store);

        Ok(Self {
            lock,
            read_operations,
            write_operations,
        })
    }

    pub fn insert(&self, documents: Vec<Document>) -> RepoResult<OperationResult> {
        let _guard = self.lock.lock();
        self.write_operations.insert(documents)
    }

    pub fn find(&self, filter: &Filter) -> RepoResult<OperationResult> {
        let _guard = self.lock.lock();
        self.read_operations.find(filter)
    }

    pub fn update(&self, update: &Document, filter: &Filter) -> RepoResult<OperationResult> {
        let _guard = self.lock.lock();
        self.write_operations.update(update, filter)
    }

    pub fn remove(&self, filter: &Filter) -> RepoResult<OperationResult> {
        let _guard = self.lock.lock();
        self.write_operations.remove(filter)
    }
}
