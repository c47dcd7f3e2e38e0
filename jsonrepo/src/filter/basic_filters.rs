use std::{any::Any, fmt::Display};

use crate::{collection::Document, common::Value, errors::RepoResult};

use super::{FilterProvider, Operator};

/// A filter that matches all documents.
///
/// It is what an empty filter document compiles to.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> RepoResult<bool> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// A filter that applies one [Operator] to the value at a field path.
///
/// The path is resolved with [Document::get], so dot-separated segments walk
/// into nested documents and arrays. A path that does not resolve hands
/// `None` to the operator; it is never an error.
pub(crate) struct FieldFilter {
    field_name: String,
    operator: Operator,
    operand: Value,
}

impl FieldFilter {
    #[inline]
    pub(crate) fn new(field_name: String, operator: Operator, operand: Value) -> Self {
        FieldFilter {
            field_name,
            operator,
            operand,
        }
    }
}

impl Display for FieldFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.field_name, self.operator, self.operand)
    }
}

impl FilterProvider for FieldFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> RepoResult<bool> {
        let resolved = entry.get(&self.field_name);
        Ok(self.operator.evaluate(resolved, &self.operand))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
