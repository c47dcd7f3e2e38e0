mod collection_operations;
mod read_operations;
mod write_operations;
mod operation_result;

pub(crate) use collection_operations::*;
pub use operation_result::*;
