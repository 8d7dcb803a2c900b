use super::{Document, WriteOptions};
use crate::common::SortableFields;
use crate::errors::PolyglotResult;
use crate::filter::Filter;
use std::ops::Deref;
use std::sync::Arc;

/// One page of a listing together with the number of matches before paging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResult {
    data: Vec<Document>,
    total: usize,
}

impl ListResult {
    pub fn new(data: Vec<Document>, total: usize) -> Self {
        ListResult { data, total }
    }

    /// The documents of the requested page.
    pub fn data(&self) -> &[Document] {
        &self.data
    }

    /// Number of matching documents, ignoring `start` and `limit`.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn into_data(self) -> Vec<Document> {
        self.data
    }

    /// Applies a fallible transform to every document, keeping `total`.
    pub fn try_map<F>(self, f: F) -> PolyglotResult<ListResult>
    where
        F: FnMut(Document) -> PolyglotResult<Document>,
    {
        let total = self.total;
        let data = self.data.into_iter().map(f).collect::<PolyglotResult<Vec<_>>>()?;
        Ok(ListResult { data, total })
    }
}

/// A tree read from the root: each child carries its own `children` array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    children: Vec<Document>,
}

impl TreeNode {
    pub fn new(children: Vec<Document>) -> Self {
        TreeNode { children }
    }

    pub fn children(&self) -> &[Document] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Document> {
        self.children
    }
}

/// The generic collection contract the localization layer is built on.
///
/// Implementations own storage, identity assignment and any ambient
/// per-user read filtering. Documents pass through unlocalized: what is
/// stored is what is returned.
pub trait CollectionProvider: Send + Sync {
    /// Lists documents matching the filter, sorted, then paged by `start`/`limit`.
    fn get_list(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
        start: Option<usize>,
        limit: Option<usize>,
    ) -> PolyglotResult<ListResult>;

    /// Finds a document by identity. `force_reload` bypasses any read cache.
    fn find_by_id(&self, id: &str, force_reload: bool) -> PolyglotResult<Option<Document>>;

    /// Finds the first document whose `text` field equals `name`.
    fn find_by_name(&self, name: &str) -> PolyglotResult<Option<Document>>;

    /// Finds the first document matching the filter.
    fn find_one(&self, filter: &Filter) -> PolyglotResult<Option<Document>>;

    /// Lists the direct children of a tree node.
    fn read_child(
        &self,
        parent_id: &str,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
    ) -> PolyglotResult<Vec<Document>>;

    /// Reads the whole tree below the root.
    fn read_tree(&self, filter: Option<&Filter>) -> PolyglotResult<TreeNode>;

    /// Stores a new document and returns it as stored.
    fn create(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document>;

    /// Writes the submitted top-level fields onto the record with the same
    /// identity and returns the stored result. Fields absent from the
    /// submission are left untouched.
    fn update(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document>;

    /// Writes the given top-level fields onto every matching record and
    /// returns how many records were touched.
    fn custom_update(&self, update: &Document, filter: &Filter) -> PolyglotResult<usize>;

    /// Counts documents matching the filter.
    fn count(&self, filter: Option<&Filter>) -> PolyglotResult<usize>;

    /// Switches ambient user filtering off (`true`) or back on (`false`) and
    /// returns the previous setting.
    fn disable_user_filter(&self, disable: bool) -> bool;

    /// Returns the name of this collection.
    fn name(&self) -> String;
}

/// A shareable handle to a [CollectionProvider].
///
/// # Examples
///
/// ```rust,ignore
/// use polyglot::collection::{Collection, InMemoryCollection};
///
/// let pages = Collection::new(InMemoryCollection::new("pages"));
/// let count = pages.count(None)?;
/// ```
#[derive(Clone)]
pub struct Collection {
    inner: Arc<dyn CollectionProvider>,
}

impl Collection {
    /// Creates a new `Collection` from a provider implementation.
    pub fn new<T: CollectionProvider + 'static>(inner: T) -> Self {
        Collection {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Collection {
    type Target = Arc<dyn CollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
