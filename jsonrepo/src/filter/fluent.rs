use crate::common::Value;

use super::{FieldFilter, Filter, Operator};

/// Creates a fluent filter builder for the specified field path.
///
/// The path uses the same dot-separated syntax as filter documents, so
/// `field("address.city").eq("Rome")` is equivalent to
/// `{"address.city": "Rome"}`.
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// Each method consumes the builder and returns a [Filter] holding exactly one
/// operator, the same filter the matching operator object would compile to.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    #[inline]
    fn build<T: Into<Value>>(self, operator: Operator, value: T) -> Filter {
        Filter::new(FieldFilter::new(self.field_name, operator, value.into()))
    }

    /// Matches documents where the field equals the value (`$eq`).
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        self.build(Operator::Eq, value)
    }

    /// Matches documents where the field is absent or differs from the value (`$ne`).
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        self.build(Operator::Ne, value)
    }

    /// Matches documents where the field is greater than the value (`$gt`).
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        self.build(Operator::Gt, value)
    }

    /// Matches documents where the field is greater than or equal to the value (`$gte`).
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        self.build(Operator::Gte, value)
    }

    /// Matches documents where the field is less than the value (`$lt`).
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        self.build(Operator::Lt, value)
    }

    /// Matches documents where the field is less than or equal to the value (`$lte`).
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        self.build(Operator::Lte, value)
    }

    /// Matches documents where the field is one of the values (`$in`).
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        self.build(Operator::In, values)
    }

    /// Matches documents where the field is none of the values (`$nin`).
    pub fn not_in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        self.build(Operator::Nin, values)
    }

    /// Matches documents where the field is a string containing `text` (`$contains`).
    pub fn contains(self, text: &str) -> Filter {
        self.build(Operator::Contains, text)
    }

    /// Matches documents where the field is a string starting with `prefix` (`$startsWith`).
    pub fn starts_with(self, prefix: &str) -> Filter {
        self.build(Operator::StartsWith, prefix)
    }

    /// Matches documents where the field is a string ending with `suffix` (`$endsWith`).
    pub fn ends_with(self, suffix: &str) -> Filter {
        self.build(Operator::EndsWith, suffix)
    }

    /// Matches documents where the field's presence equals `present` (`$exists`).
    pub fn exists(self, present: bool) -> Filter {
        self.build(Operator::Exists, present)
    }
}
