use crate::collection::operation::OperationResult;
use crate::errors::RepoResult;
use crate::filter::Filter;
use crate::store::EntityStore;

/// Read side of an entity collection.
#[derive(Clone)]
pub(crate) struct ReadOperations {
    entity: String,
    store: EntityStore,
}

impl ReadOperations {
    pub fn new(entity: String, store: EntityStore) -> Self {
        ReadOperations { entity, store }
    }

    /// Returns the documents matching the filter in stored order.
    ///
    /// The unconditional filter returns the collection untouched.
    pub fn find(&self, filter: &Filter) -> RepoResult<OperationResult> {
        let documents = self.store.load(&self.entity)?;

        if filter.is_all() {
            let message = format!("Retrieved {} item(s)", documents.len());
            return Ok(OperationResult::new(documents, message));
        }

        let mut matched = Vec::new();
        for document in documents {
            if filter.apply(&document)? {
                matched.push(document);
            }
        }

        log::debug!(
            "Found {} document(s) in entity '{}' matching {}",
            matched.len(),
            self.entity,
            filter
        );
        let message = format!("Retrieved {} item(s) matching filters", matched.len());
        Ok(OperationResult::new(matched, message))
    }
}
