use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::common::Value;
use crate::errors::{ErrorKind, RepoError};

/// A named comparison applied to one resolved field value.
///
/// The operand is the value written next to the operator in the filter
/// document (`{"age": {"$gte": 25}}` has operator [Operator::Gte] and operand
/// `25`). The resolved value is `None` when the document has no value at the
/// field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `$eq`: strict equality
    Eq,
    /// `$ne`: strict inequality
    Ne,
    /// `$gt`: greater than
    Gt,
    /// `$gte`: greater than or equal
    Gte,
    /// `$lt`: less than
    Lt,
    /// `$lte`: less than or equal
    Lte,
    /// `$in`: member of the operand sequence
    In,
    /// `$nin`: not a member of the operand sequence
    Nin,
    /// `$contains`: string contains the operand
    Contains,
    /// `$startsWith`: string starts with the operand
    StartsWith,
    /// `$endsWith`: string ends with the operand
    EndsWith,
    /// `$exists`: presence of the field equals the boolean operand
    Exists,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::Contains => "$contains",
            Operator::StartsWith => "$startsWith",
            Operator::EndsWith => "$endsWith",
            Operator::Exists => "$exists",
        }
    }

    /// Evaluates the operator on a resolved field value.
    ///
    /// Operand shapes the operator cannot use (a non-sequence for `$in`, a
    /// non-string for `$contains`, a non-boolean for `$exists`) and values
    /// that are not mutually ordinable never match.
    pub fn evaluate(&self, resolved: Option<&Value>, operand: &Value) -> bool {
        match self {
            Operator::Eq => resolved.is_some_and(|value| value == operand),
            Operator::Ne => !resolved.is_some_and(|value| value == operand),
            Operator::Gt => ordering(resolved, operand).is_some_and(Ordering::is_gt),
            Operator::Gte => ordering(resolved, operand).is_some_and(Ordering::is_ge),
            Operator::Lt => ordering(resolved, operand).is_some_and(Ordering::is_lt),
            Operator::Lte => ordering(resolved, operand).is_some_and(Ordering::is_le),
            Operator::In => match operand {
                Value::Array(candidates) => {
                    resolved.is_some_and(|value| candidates.contains(value))
                }
                _ => false,
            },
            Operator::Nin => match operand {
                Value::Array(candidates) => {
                    !resolved.is_some_and(|value| candidates.contains(value))
                }
                _ => false,
            },
            Operator::Contains => string_match(resolved, operand, |s, t| s.contains(t)),
            Operator::StartsWith => string_match(resolved, operand, |s, t| s.starts_with(t)),
            Operator::EndsWith => string_match(resolved, operand, |s, t| s.ends_with(t)),
            Operator::Exists => operand
                .as_bool()
                .is_some_and(|expected| resolved.is_some() == expected),
        }
    }
}

#[inline]
fn ordering(resolved: Option<&Value>, operand: &Value) -> Option<Ordering> {
    resolved?.compare(operand)
}

#[inline]
fn string_match(resolved: Option<&Value>, operand: &Value, f: impl Fn(&str, &str) -> bool) -> bool {
    match (resolved.and_then(Value::as_str), operand.as_str()) {
        (Some(value), Some(pattern)) => f(value, pattern),
        _ => false,
    }
}

impl FromStr for Operator {
    type Err = RepoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "$eq" => Ok(Operator::Eq),
            "$ne" => Ok(Operator::Ne),
            "$gt" => Ok(Operator::Gt),
            "$gte" => Ok(Operator::Gte),
            "$lt" => Ok(Operator::Lt),
            "$lte" => Ok(Operator::Lte),
            "$in" => Ok(Operator::In),
            "$nin" => Ok(Operator::Nin),
            "$contains" => Ok(Operator::Contains),
            "$startsWith" => Ok(Operator::StartsWith),
            "$endsWith" => Ok(Operator::EndsWith),
            "$exists" => Ok(Operator::Exists),
            _ => {
                log::error!("Unknown operator {} in filter", name);
                Err(RepoError::new(
                    &format!("Unknown operator: {}", name),
                    ErrorKind::UnknownOperator,
                ))
            }
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
