//! Shared building blocks: the dynamic [Value] type, constants and the
//! per-entity [LockRegistry].

mod constants;
mod lock;
mod value;

pub use constants::*;
pub use lock::*;
pub use value::*;
