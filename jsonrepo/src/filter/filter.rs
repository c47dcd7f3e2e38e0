use crate::collection::Document;
use crate::errors::RepoResult;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::AndFilter;
use super::NotFilter;
use super::OrFilter;

/// Trait for implementing filters.
///
/// A `FilterProvider` decides whether a single document matches. Providers
/// are composed into trees by the logical filters and wrapped in [Filter].
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Arguments
    ///
    /// * `entry` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the document matches the filter, `Ok(false)` otherwise
    fn apply(&self, entry: &Document) -> RepoResult<bool>;

    fn as_any(&self) -> &dyn Any;
}

/// A predicate selecting documents from an entity collection.
///
/// A `Filter` is either built with the fluent API ([field](super::field),
/// [and], [or], [not], [all]) or compiled from a filter document with
/// [Filter::from_document]. Cloning is cheap; the provider tree is shared.
///
/// # Filter Composition
///
/// - `and(other)` - Combines with another filter using logical AND
/// - `or(other)` - Combines with another filter using logical OR
/// - `not()` - Negates the filter using logical NOT
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
/// use jsonrepo::filter::field;
///
/// let filter = field("age").gte(25).and(field("city").eq("Rome"));
/// assert!(filter.apply(&doc! { age: 30, city: "Rome" }).unwrap());
/// assert!(!filter.apply(&doc! { age: 20, city: "Rome" }).unwrap());
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Combines this filter with another using logical OR.
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }

    /// Negates this filter using logical NOT.
    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }

    /// Returns `true` for the unconditional filter produced by [all] or by an
    /// empty filter document.
    ///
    /// UPDATE and DELETE refuse such filters.
    pub fn is_all(&self) -> bool {
        self.inner.as_any().is::<AllFilter>()
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(AllFilter)
}

/// Combines multiple filters using logical AND.
///
/// An empty list matches every document.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Combines multiple filters using logical OR.
///
/// An empty list matches no document.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Negates a filter using logical NOT.
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

/// Evaluates a filter document against a single document.
///
/// The filter document is compiled first, so an unknown operator or a
/// malformed combinator is reported even when it would not be reached.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
/// use jsonrepo::filter::matches;
///
/// let person = doc! { "_id": "1", age: 30, city: "Rome" };
/// assert!(matches(&person, &doc! { age: { "$gte": 25 } }).unwrap());
/// assert!(matches(&person, &doc! { name: { "$exists": false } }).unwrap());
/// assert!(matches(&person, &doc! { age: { "$weird": 1 } }).is_err());
/// ```
pub fn matches(document: &Document, filter: &Document) -> RepoResult<bool> {
    Filter::from_document(filter)?.apply(document)
}
