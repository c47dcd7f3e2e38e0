//! The uniform request/response boundary.
//!
//! A [Request] names an entity, an operation and its inputs; executing it
//! always yields a [Response], never an error. Failures are reported in the
//! response with `success: false`.
//!
//! ```json
//! {
//!   "entity": "users",
//!   "operation": "get",
//!   "filters": { "age": { "$gte": 25 } },
//!   "config": { "basePath": "/var/lib/app/db" }
//! }
//! ```
//!
//! ```json
//! {
//!   "success": true,
//!   "operation": "GET",
//!   "entity": "users",
//!   "data": [{ "_id": "…", "name": "Anna", "age": 30 }],
//!   "count": 1,
//!   "message": "Retrieved 1 item(s) matching filters"
//! }
//! ```

mod dispatcher;
mod operation;
mod request;
mod response;

pub use dispatcher::*;
pub use operation::*;
pub use request::*;
pub use response::*;
