use crate::collection::Document;
use crate::errors::PolyglotResult;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::{AllFilter, AndFilter, IdFilter, NotFilter, OrFilter};

/// Trait for implementing custom filters.
///
/// A `FilterProvider` decides whether a stored document matches.
pub trait FilterProvider: Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    fn apply(&self, entry: &Document) -> PolyglotResult<bool>;
}

/// A query filter for selecting documents from a collection.
///
/// `Filter` is a cheap-clone handle over a [FilterProvider]. Filters compose
/// with `and`, `or` and `not`.
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
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
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

/// Creates a filter that matches a document by its identity field, whether
/// the id is stored as a string or as an integer.
pub fn by_id(id: &str) -> Filter {
    Filter::new(IdFilter::new(id.to_string()))
}

/// Applies an optional filter; no filter matches everything.
pub(crate) fn matches(filter: Option<&Filter>, entry: &Document) -> PolyglotResult<bool> {
    match filter {
        Some(filter) => filter.apply(entry),
        None => Ok(true),
    }
}
