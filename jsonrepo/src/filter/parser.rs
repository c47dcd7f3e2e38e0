use crate::collection::Document;
use crate::common::{Value, AND_OPERATOR, NOT_OPERATOR, OR_OPERATOR};
use crate::errors::{ErrorKind, RepoError, RepoResult};

use super::{all, and, not, or, FieldFilter, Filter, Operator};

impl Filter {
    /// Compiles a filter document into a [Filter].
    ///
    /// Every entry of the document becomes one constraint and the constraints
    /// are ANDed together:
    ///
    /// * `$and` - a sequence of sub-filter documents, all must match
    /// * `$or` - a sequence of sub-filter documents, at least one must match
    /// * `$not` - one sub-filter document that must not match
    /// * any other key is a dot-separated field path; its value is either an
    ///   operator object (`{"$gte": 25, "$lt": 65}`, all operators must hold)
    ///   or a literal compared with strict equality
    ///
    /// Combinators and field paths can be mixed in one document, in which
    /// case all of them must hold. An empty document compiles to [all].
    ///
    /// # Errors
    ///
    /// * [ErrorKind::UnknownOperator] when an operator object names an
    ///   operator that does not exist
    /// * [ErrorKind::FilterError] when a combinator is given the wrong shape
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonrepo::doc;
    /// use jsonrepo::filter::Filter;
    ///
    /// let filter = Filter::from_document(&doc! {
    ///     "$or": [{ city: "Rome" }, { age: { "$lt": 18 } }]
    /// }).unwrap();
    /// assert!(filter.apply(&doc! { city: "Turin", age: 12 }).unwrap());
    /// ```
    pub fn from_document(document: &Document) -> RepoResult<Filter> {
        let mut filters = Vec::with_capacity(document.len());
        for (key, value) in document {
            let filter = match key.as_str() {
                AND_OPERATOR => and(parse_sub_filters(key, value)?),
                OR_OPERATOR => or(parse_sub_filters(key, value)?),
                NOT_OPERATOR => not(parse_sub_filter(key, value)?),
                _ => parse_field_constraint(key, value)?,
            };
            filters.push(filter);
        }

        Ok(match filters.len() {
            0 => all(),
            1 => filters.remove(0),
            _ => and(filters),
        })
    }
}

fn parse_sub_filters(combinator: &str, value: &Value) -> RepoResult<Vec<Filter>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| parse_sub_filter(combinator, item))
            .collect(),
        _ => {
            log::error!("{} expects a sequence of filters, found {}", combinator, value.type_name());
            Err(RepoError::new(
                &format!(
                    "{} expects a sequence of filters, found {}",
                    combinator,
                    value.type_name()
                ),
                ErrorKind::FilterError,
            ))
        }
    }
}

fn parse_sub_filter(combinator: &str, value: &Value) -> RepoResult<Filter> {
    match value {
        Value::Document(sub_filter) => Filter::from_document(sub_filter),
        _ => {
            log::error!("{} expects a filter object, found {}", combinator, value.type_name());
            Err(RepoError::new(
                &format!(
                    "{} expects a filter object, found {}",
                    combinator,
                    value.type_name()
                ),
                ErrorKind::FilterError,
            ))
        }
    }
}

fn parse_field_constraint(field_name: &str, constraint: &Value) -> RepoResult<Filter> {
    match constraint {
        Value::Document(operators) => {
            let mut filters = Vec::with_capacity(operators.len());
            for (name, operand) in operators {
                let operator: Operator = name.parse()?;
                filters.push(Filter::new(FieldFilter::new(
                    field_name.to_string(),
                    operator,
                    operand.clone(),
                )));
            }
            // an empty operator object still counts as a constraint,
            // so it must not collapse into the unconditional filter
            Ok(match filters.len() {
                1 => filters.remove(0),
                _ => and(filters),
            })
        }
        literal => Ok(Filter::new(FieldFilter::new(
            field_name.to_string(),
            Operator::Eq,
            literal.clone(),
        ))),
    }
}
