//! Filters for selecting documents from an entity collection.
//!
//! A filter is a predicate tree evaluated against one document at a time. It
//! is either compiled from a filter document with [Filter::from_document] or
//! built with the fluent API.
//!
//! # Filter documents
//!
//! ```json
//! {
//!   "$or": [{ "city": "Rome" }, { "age": { "$lt": 18 } }],
//!   "address.zip": { "$exists": true }
//! }
//! ```
//!
//! - `$and`, `$or` take a sequence of sub-filters, `$not` takes one
//! - any other key is a dot-separated field path
//! - a field path maps to a literal (strict equality) or an operator object
//! - all entries of one document must hold
//!
//! # Fluent API
//!
//! ```rust
//! use jsonrepo::filter::{field, or};
//!
//! let filter = or(vec![field("city").eq("Rome"), field("age").lt(18)])
//!     .and(field("address.zip").exists(true));
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: `$eq`, `$ne`
//! - **Comparison**: `$gt`, `$gte`, `$lt`, `$lte`
//! - **Membership**: `$in`, `$nin`
//! - **String**: `$contains`, `$startsWith`, `$endsWith`
//! - **Presence**: `$exists`
//! - **Logical**: `$and`, `$or`, `$not`

mod filter;
mod fluent;
mod operator;
mod parser;

mod basic_filters;
mod logical_filters;

pub(crate) use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub(crate) use logical_filters::*;
pub use operator::*;
