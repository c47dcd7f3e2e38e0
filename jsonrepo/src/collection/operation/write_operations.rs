use std::collections::HashSet;

use uuid::Uuid;

use crate::collection::operation::OperationResult;
use crate::collection::Document;
use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::filter::Filter;
use crate::store::EntityStore;

/// Write side of an entity collection.
///
/// Every operation loads the whole collection, computes the new state and
/// persists it in one piece. Nothing is persisted when an operation fails.
#[derive(Clone)]
pub(crate) struct WriteOperations {
    entity: String,
    store: EntityStore,
}

impl WriteOperations {
    pub fn new(entity: String, store: EntityStore) -> Self {
        WriteOperations { entity, store }
    }

    /// Appends documents to the collection.
    ///
    /// Documents without an `_id` (or with a null or empty one) get a fresh
    /// UUID. The batch is rejected as a whole when an `_id` is not a string,
    /// already exists in the collection or occurs twice in the batch.
    pub fn insert(&self, documents: Vec<Document>) -> RepoResult<OperationResult> {
        let mut collection = self.store.load(&self.entity)?;
        let mut known_ids: HashSet<String> = collection
            .iter()
            .filter_map(|document| document.id().map(str::to_string))
            .collect();

        let mut added = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = prepare_id(&mut document)?;
            if !known_ids.insert(id.clone()) {
                log::error!("Document already exists with id {} in entity '{}'", id, self.entity);
                return Err(RepoError::new(
                    &format!("Duplicate _id: {}", id),
                    ErrorKind::DuplicateKey,
                ));
            }
            added.push(document);
        }

        collection.extend(added.iter().cloned());
        self.store.persist(&self.entity, &collection)?;

        log::debug!("Added {} document(s) to entity '{}'", added.len(), self.entity);
        let message = format!("Successfully added {} item(s)", added.len());
        Ok(OperationResult::new(added, message))
    }

    /// Shallow-merges `update` into every matching document.
    ///
    /// The `_id` of an updated document is never changed, whatever `update`
    /// contains. Documents that do not match keep their content and position.
    pub fn update(&self, update: &Document, filter: &Filter) -> RepoResult<OperationResult> {
        if filter.is_all() {
            log::error!("Refusing to update entity '{}' without filters", self.entity);
            return Err(RepoError::new(
                "Filters are required for UPDATE operation (safety measure)",
                ErrorKind::ValidationError,
            ));
        }

        let collection = self.store.load(&self.entity)?;
        let mut updated = Vec::new();
        let mut new_collection = Vec::with_capacity(collection.len());

        for document in collection {
            if filter.apply(&document)? {
                let mut merged = document.clone();
                merged.merge(update);
                match document.get_field(DOC_ID) {
                    Some(id) => merged.put(DOC_ID, id.clone()),
                    None => {
                        merged.remove(DOC_ID);
                    }
                }
                updated.push(merged.clone());
                new_collection.push(merged);
            } else {
                new_collection.push(document);
            }
        }

        self.store.persist(&self.entity, &new_collection)?;

        log::debug!("Updated {} document(s) in entity '{}'", updated.len(), self.entity);
        let message = format!("Successfully updated {} item(s)", updated.len());
        Ok(OperationResult::new(updated, message))
    }

    /// Removes every matching document and returns the removed ones.
    pub fn remove(&self, filter: &Filter) -> RepoResult<OperationResult> {
        if filter.is_all() {
            log::error!("Refusing to delete from entity '{}' without filters", self.entity);
            return Err(RepoError::new(
                "Filters are required for DELETE operation (safety measure)",
                ErrorKind::ValidationError,
            ));
        }

        let collection = self.store.load(&self.entity)?;
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(collection.len());

        for document in collection {
            if filter.apply(&document)? {
                removed.push(document);
            } else {
                kept.push(document);
            }
        }

        self.store.persist(&self.entity, &kept)?;

        log::debug!("Removed {} document(s) from entity '{}'", removed.len(), self.entity);
        let message = format!("Successfully deleted {} item(s)", removed.len());
        Ok(OperationResult::new(removed, message))
    }
}

/// Ensures the document carries a string `_id` and returns it.
fn prepare_id(document: &mut Document) -> RepoResult<String> {
    let id = match document.get_field(DOC_ID) {
        Some(Value::String(id)) if !id.is_empty() => return Ok(id.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => Uuid::new_v4().to_string(),
        Some(other) => {
            log::error!("Document _id must be a string, found {}", other.type_name());
            return Err(RepoError::new(
                &format!("_id must be a string, found {}: {}", other.type_name(), other),
                ErrorKind::ValidationError,
            ));
        }
    };
    document.put(DOC_ID, id.clone());
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::{all, and, field};
    use crate::store::{EntityStoreProvider, MemoryStore};

    fn setup_write_operations() -> (MemoryStore, WriteOperations) {
        let store = MemoryStore::new();
        store
            .persist(
                "users",
                &[
                    doc! { "_id": "1", name: "Anna", city: "Rome", age: 30 },
                    doc! { "_id": "2", name: "Bob", city: "Turin", age: 20 },
                    doc! { "_id": "3", name: "Carla", city: "Rome", age: 45 },
                ],
            )
            .unwrap();
        let write_operations =
            WriteOperations::new("users".to_string(), EntityStore::new(store.clone()));
        (store, write_operations)
    }

    fn ids(documents: &[Document]) -> Vec<&str> {
        documents.iter().filter_map(|d| d.id()).collect()
    }

    #[test]
    fn test_insert_generates_ids() {
        let (store, write_operations) = setup_write_operations();
        let result = write_operations
            .insert(vec![doc! { name: "Dan" }, doc! { "_id": (Value::Null), name: "Eve" }, doc! { "_id": "", name: "Fay" }])
            .unwrap();

        assert_eq!(result.count(), 3);
        assert_eq!(result.message(), "Successfully added 3 item(s)");
        let generated = ids(result.documents());
        assert_eq!(generated.len(), 3);
        assert!(generated.iter().all(|id| Uuid::parse_str(id).is_ok()));
        assert_ne!(generated[0], generated[1]);

        let stored = store.load("users").unwrap();
        assert_eq!(stored.len(), 6);
        assert_eq!(&stored[3..], result.documents());
    }

    #[test]
    fn test_insert_keeps_given_id() {
        let (_, write_operations) = setup_write_operations();
        let result = write_operations.insert(vec![doc! { "_id": "x9", name: "Gus" }]).unwrap();
        assert_eq!(ids(result.documents()), vec!["x9"]);
    }

    #[test]
    fn test_insert_duplicate_id() {
        let (store, write_operations) = setup_write_operations();
        let err = write_operations
            .insert(vec![doc! { "_id": "9" }, doc! { "_id": "2" }])
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
        assert_eq!(err.message(), "Duplicate _id: 2");
        assert_eq!(store.load("users").unwrap().len(), 3);
    }

    #[test]
    fn test_insert_duplicate_id_in_batch() {
        let (store, write_operations) = setup_write_operations();
        let err = write_operations
            .insert(vec![doc! { "_id": "7" }, doc! { "_id": "7" }])
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
        assert_eq!(store.load("users").unwrap().len(), 3);
    }

    #[test]
    fn test_insert_non_string_id() {
        let (store, write_operations) = setup_write_operations();
        let err = write_operations.insert(vec![doc! { "_id": 5 }]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
        assert_eq!(store.load("users").unwrap().len(), 3);
    }

    #[test]
    fn test_insert_empty_batch() {
        let (store, write_operations) = setup_write_operations();
        let result = write_operations.insert(vec![]).unwrap();
        assert_eq!(result.count(), 0);
        assert_eq!(result.message(), "Successfully added 0 item(s)");
        assert_eq!(store.load("users").unwrap().len(), 3);
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let (store, write_operations) = setup_write_operations();
        let result = write_operations
            .update(&doc! { "_id": "hijack", age: 31, active: true }, &field("city").eq("Rome"))
            .unwrap();

        assert_eq!(result.count(), 2);
        assert_eq!(result.message(), "Successfully updated 2 item(s)");
        assert_eq!(ids(result.documents()), vec!["1", "3"]);

        let stored = store.load("users").unwrap();
        assert_eq!(ids(&stored), vec!["1", "2", "3"]);
        assert_eq!(stored[0], doc! { "_id": "1", name: "Anna", city: "Rome", age: 31, active: true });
        assert_eq!(stored[1], doc! { "_id": "2", name: "Bob", city: "Turin", age: 20 });
        assert_eq!(stored[2].get("age"), Some(&Value::from(31)));
    }

    #[test]
    fn test_update_without_id_does_not_add_one() {
        let store = MemoryStore::new();
        store.persist("notes", &[doc! { text: "a" }]).unwrap();
        let write_operations = WriteOperations::new("notes".to_string(), EntityStore::new(store.clone()));

        write_operations
            .update(&doc! { "_id": "new", text: "b" }, &field("text").eq("a"))
            .unwrap();
        assert_eq!(store.load("notes").unwrap(), vec![doc! { text: "b" }]);
    }

    #[test]
    fn test_update_requires_filter() {
        let (store, write_operations) = setup_write_operations();
        let err = write_operations.update(&doc! { age: 1 }, &all()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
        assert_eq!(err.message(), "Filters are required for UPDATE operation (safety measure)");
        assert!(store.load("users").unwrap().iter().all(|d| d.get("age") != Some(&Value::from(1))));
    }

    #[test]
    fn test_update_with_no_match() {
        let (_, write_operations) = setup_write_operations();
        let result = write_operations.update(&doc! { age: 1 }, &field("city").eq("Naples")).unwrap();
        assert_eq!(result.count(), 0);
        assert_eq!(result.message(), "Successfully updated 0 item(s)");
    }

    #[test]
    fn test_remove() {
        let (store, write_operations) = setup_write_operations();
        let result = write_operations.remove(&field("city").eq("Rome")).unwrap();
        assert_eq!(result.message(), "Successfully deleted 2 item(s)");
        assert_eq!(ids(result.documents()), vec!["1", "3"]);
        assert_eq!(ids(&store.load("users").unwrap()), vec!["2"]);
    }

    #[test]
    fn test_remove_requires_filter() {
        let (store, write_operations) = setup_write_operations();
        let err = write_operations.remove(&all()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
        assert_eq!(err.message(), "Filters are required for DELETE operation (safety measure)");
        assert_eq!(store.load("users").unwrap().len(), 3);
    }

    #[test]
    fn test_remove_with_empty_conjunction_removes_everything() {
        let (store, write_operations) = setup_write_operations();
        let result = write_operations.remove(&and(vec![])).unwrap();
        assert_eq!(result.count(), 3);
        assert!(store.load("users").unwrap().is_empty());
    }
}
