//! # jsonrepo - Embedded JSON Document Repository
//!
//! jsonrepo stores schema-less documents in named entity collections, one
//! JSON file per entity, and offers four operations on them: add, get,
//! update and delete, with documents selected by structured filters.
//!
//! ## Key Features
//!
//! - **Embedded**: No server process; collections are plain JSON files
//! - **Schema-less**: Documents are ordered maps of JSON values
//! - **Rich Filters**: `$and`/`$or`/`$not`, comparison, membership, string
//!   and presence operators on nested dot paths
//! - **Safe Writes**: Whole-file atomic replacement and optional backups
//! - **Serialized Access**: Operations on one entity never interleave
//!   within a process
//! - **Request API**: A uniform request/response boundary that never fails
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonrepo::doc;
//! use jsonrepo::filter::field;
//! use jsonrepo::repository::Repository;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Repository::builder()
//!     .base_path(std::env::temp_dir().join("jsonrepo-quick-start"))
//!     .open()?;
//!
//! repository.add("users", vec![doc! { name: "Anna", age: 30 }])?;
//!
//! let adults = repository.get("users", &field("age").gte(18))?;
//! for user in adults.documents() {
//!     println!("{}", user);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The same operations are available as data through [request::execute]:
//!
//! ```rust
//! use jsonrepo::request::execute_json;
//!
//! let response = execute_json(r#"{"entity": "users", "operation": "DELETE"}"#);
//! assert!(!response.success);
//! assert_eq!(response.message, "Filters are required for DELETE operation (safety measure)");
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, collections and operation results
//! - [`common`] - Values, constants and the entity lock registry
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Filter documents and the fluent filter API
//! - [`repository`] - The repository and its operations
//! - [`repository_builder`] - Builder for opening repositories
//! - [`repository_config`] - Repository configuration
//! - [`request`] - Request/response dispatch
//! - [`store`] - File and memory storage backends

use crate::common::LockRegistry;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod repository;
pub mod repository_builder;
pub mod repository_config;
pub mod request;
pub mod store;

/// Entity locks of the process, keyed by storage location.
pub(crate) static ENTITY_LOCKS: LazyLock<LockRegistry> = LazyLock::new(LockRegistry::new);
