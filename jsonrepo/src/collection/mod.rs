//! Documents and entity collections.
//!
//! # Documents
//!
//! A [Document] is an insertion-ordered map of field names to
//! [Value](crate::common::Value)s. Nested fields are addressed with
//! dot-separated paths, and numeric segments index into arrays:
//!
//! ```rust
//! use jsonrepo::doc;
//! use jsonrepo::common::Value;
//!
//! let doc = doc! { name: "Anna", address: { city: "Rome" }, scores: [7, 9] };
//! assert_eq!(doc.get("address.city"), Some(&Value::from("Rome")));
//! assert_eq!(doc.get("scores.1"), Some(&Value::from(9)));
//! ```
//!
//! # Collections
//!
//! A [Collection] is the ordered sequence of documents stored for one
//! entity. Adding appends to it; updating and deleting keep the relative
//! order of the documents they do not touch.
//!
//! # Document IDs
//!
//! The reserved `_id` field is a string unique within its collection. It is
//! generated as a UUID when a document is added without one, and it never
//! changes afterwards.

mod document;
pub(crate) mod operation;

pub use document::*;
pub use operation::OperationResult;

/// The ordered documents of one entity.
pub type Collection = Vec<Document>;
