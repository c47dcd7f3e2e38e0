use crate::collection::Document;

/// The outcome of a successful repository operation.
///
/// It holds the documents the operation produced (the added, matching,
/// updated or deleted documents), their count and a human readable summary
/// such as `Successfully added 2 item(s)`.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
/// use jsonrepo::repository::Repository;
///
/// let repository = Repository::builder().in_memory().open().unwrap();
/// let result = repository.add("users", vec![doc! { name: "Anna" }]).unwrap();
///
/// assert_eq!(result.count(), 1);
/// assert_eq!(result.message(), "Successfully added 1 item(s)");
/// for document in result {
///     assert!(document.id().is_some());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    documents: Vec<Document>,
    count: usize,
    message: String,
}

impl OperationResult {
    pub fn new(documents: Vec<Document>, message: String) -> Self {
        OperationResult {
            count: documents.len(),
            documents,
            message,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    pub(crate) fn into_parts(self) -> (Vec<Document>, usize, String) {
        (self.documents, self.count, self.message)
    }
}

impl IntoIterator for OperationResult {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}
