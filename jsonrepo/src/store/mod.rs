//! Storage backends for entity collections.
//!
//! An entity collection is loaded and persisted as a whole: every operation
//! reads the full collection, computes the new state in memory and writes the
//! full collection back. Backends implement [EntityStoreProvider] and are
//! shared through the cheap-to-clone [EntityStore] handle.
//!
//! # Backends
//!
//! - **File store**: [FileStore] keeps each entity in `{basePath}/{entity}.json`
//!   as a JSON array, with an optional `{entity}.json.backup` copy of the
//!   previous state.
//! - **Memory store**: [MemoryStore] keeps collections in process memory for
//!   tests and ephemeral use.
//!
//! # Entity names
//!
//! Entity names are relative, `/`-separated paths (`users`, `shop/orders`).
//! Empty names, empty, `.` or `..` segments, absolute names, backslashes and
//! NUL characters are rejected with a validation error before any storage
//! is touched.

mod entity_store;
mod file_store;
mod memory_store;
mod path_resolver;

pub use entity_store::*;
pub use file_store::*;
pub use memory_store::*;
pub use path_resolver::*;
