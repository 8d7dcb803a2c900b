use indexmap::IndexMap;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use super::{CollectionProvider, Document, ListResult, TreeNode, WriteOptions};
use crate::common::{
    sort_by, SortOrder, SortableFields, Value, CHILDREN, CREATE_TIME, DOC_ID, LAST_UPDATE_TIME,
    ORDER_VALUE, PARENT_ID, ROOT_PARENT, TEXT, VERSION,
};
use crate::errors::{ErrorKind, PolyglotError, PolyglotResult};
use crate::filter::{field, matches, Filter};

/// A [CollectionProvider] keeping every record in memory.
///
/// Records are kept in insertion order, which is the listing order when no
/// sort is requested. On `create` a record gets a UUID v4 `id` when it has
/// none, `createTime`/`lastUpdateTime` in epoch milliseconds and
/// `version = 1`; every write through `update` or `custom_update` bumps
/// `version` and `lastUpdateTime`.
///
/// An optional user filter restricts all reads, as a per-user access rule
/// would, until it is switched off with `disable_user_filter(true)`. Writes
/// are never restricted.
///
/// Cloning is cheap and all clones share the same records.
///
/// # Examples
///
/// ```rust,ignore
/// use polyglot::collection::{Collection, InMemoryCollection, WriteOptions};
/// use polyglot::doc;
///
/// let pages = Collection::new(InMemoryCollection::new("pages"));
/// let stored = pages.create(doc!{ text: "home" }, &WriteOptions::default())?;
/// assert!(stored.has_id());
/// ```
#[derive(Clone)]
pub struct InMemoryCollection {
    inner: Arc<InMemoryCollectionInner>,
}

impl InMemoryCollection {
    /// Creates an empty collection without user filtering.
    pub fn new(name: &str) -> Self {
        InMemoryCollection {
            inner: Arc::new(InMemoryCollectionInner::new(name, None)),
        }
    }

    /// Creates an empty collection whose reads are restricted by `user_filter`.
    pub fn with_user_filter(name: &str, user_filter: Filter) -> Self {
        InMemoryCollection {
            inner: Arc::new(InMemoryCollectionInner::new(name, Some(user_filter))),
        }
    }

    /// Number of stored records, ignoring any user filter.
    pub fn size(&self) -> usize {
        self.inner.documents.read().len()
    }
}

impl CollectionProvider for InMemoryCollection {
    fn get_list(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
        start: Option<usize>,
        limit: Option<usize>,
    ) -> PolyglotResult<ListResult> {
        self.inner.get_list(filter, sort, start, limit)
    }

    fn find_by_id(&self, id: &str, force_reload: bool) -> PolyglotResult<Option<Document>> {
        self.inner.find_by_id(id, force_reload)
    }

    fn find_by_name(&self, name: &str) -> PolyglotResult<Option<Document>> {
        self.inner.find_one(&field(TEXT).eq(name))
    }

    fn find_one(&self, filter: &Filter) -> PolyglotResult<Option<Document>> {
        self.inner.find_one(filter)
    }

    fn read_child(
        &self,
        parent_id: &str,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
    ) -> PolyglotResult<Vec<Document>> {
        self.inner.read_child(parent_id, filter, sort)
    }

    fn read_tree(&self, filter: Option<&Filter>) -> PolyglotResult<TreeNode> {
        self.inner.read_tree(filter)
    }

    fn create(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document> {
        self.inner.create(document, options)
    }

    fn update(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document> {
        self.inner.update(document, options)
    }

    fn custom_update(&self, update: &Document, filter: &Filter) -> PolyglotResult<usize> {
        self.inner.custom_update(update, filter)
    }

    fn count(&self, filter: Option<&Filter>) -> PolyglotResult<usize> {
        Ok(self.inner.select(filter, None)?.len())
    }

    fn disable_user_filter(&self, disable: bool) -> bool {
        self.inner
            .user_filter_disabled
            .swap(disable, AtomicOrdering::SeqCst)
    }

    fn name(&self) -> String {
        self.inner.name.clone()
    }
}

struct InMemoryCollectionInner {
    name: String,
    documents: RwLock<IndexMap<String, Document>>,
    user_filter: Option<Filter>,
    user_filter_disabled: AtomicBool,
}

impl InMemoryCollectionInner {
    fn new(name: &str, user_filter: Option<Filter>) -> Self {
        InMemoryCollectionInner {
            name: name.to_string(),
            documents: RwLock::new(IndexMap::new()),
            user_filter,
            user_filter_disabled: AtomicBool::new(false),
        }
    }

    fn is_visible(&self, document: &Document) -> PolyglotResult<bool> {
        if self.user_filter_disabled.load(AtomicOrdering::SeqCst) {
            return Ok(true);
        }
        matches(self.user_filter.as_ref(), document)
    }

    fn select(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
    ) -> PolyglotResult<Vec<Document>> {
        let documents = self.documents.read();
        let mut selected = Vec::new();
        for document in documents.values() {
            if self.is_visible(document)? && matches(filter, document)? {
                selected.push(document.clone());
            }
        }
        drop(documents);

        if let Some(sort) = sort {
            sort_documents(&mut selected, sort);
        }
        Ok(selected)
    }

    fn get_list(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
        start: Option<usize>,
        limit: Option<usize>,
    ) -> PolyglotResult<ListResult> {
        let selected = self.select(filter, sort)?;
        let total = selected.len();
        let data = selected
            .into_iter()
            .skip(start.unwrap_or(0))
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(ListResult::new(data, total))
    }

    fn find_by_id(&self, id: &str, _force_reload: bool) -> PolyglotResult<Option<Document>> {
        // nothing is cached, every read is already fresh
        let document = self.documents.read().get(id).cloned();
        match document {
            Some(document) if self.is_visible(&document)? => Ok(Some(document)),
            _ => Ok(None),
        }
    }

    fn find_one(&self, filter: &Filter) -> PolyglotResult<Option<Document>> {
        let documents = self.documents.read();
        for document in documents.values() {
            if self.is_visible(document)? && filter.apply(document)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    fn read_child(
        &self,
        parent_id: &str,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
    ) -> PolyglotResult<Vec<Document>> {
        let by_parent = field(PARENT_ID).eq(parent_id);
        let filter = match filter {
            Some(filter) => by_parent.and(filter.clone()),
            None => by_parent,
        };
        self.select(Some(&filter), sort)
    }

    fn read_tree(&self, filter: Option<&Filter>) -> PolyglotResult<TreeNode> {
        let nodes = self.select(filter, Some(&sort_by(ORDER_VALUE, SortOrder::Ascending)))?;

        let mut by_parent: HashMap<String, Vec<Document>> = HashMap::new();
        for node in nodes {
            if let Some(Value::String(parent)) = node.field(PARENT_ID) {
                by_parent.entry(parent.clone()).or_default().push(node);
            }
        }

        let mut visited = HashSet::new();
        let children = build_subtree(ROOT_PARENT, &by_parent, &mut visited);
        Ok(TreeNode::new(children))
    }

    fn create(&self, document: Document, _options: &WriteOptions) -> PolyglotResult<Document> {
        let mut documents = self.documents.write();
        insert_new(&mut documents, document, &self.name)
    }

    fn update(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document> {
        let Some(id) = document.id() else {
            log::error!("Cannot update a document without id in {}", self.name);
            return Err(PolyglotError::new(
                "Cannot update a document without id",
                ErrorKind::InvalidId,
            ));
        };

        let mut documents = self.documents.write();
        if let Some(stored) = documents.get_mut(&id) {
            apply_update(stored, &document);
            log::debug!("Updated document {} in {}", id, self.name);
            return Ok(stored.clone());
        }

        if options.is_insert_if_absent() {
            return insert_new(&mut documents, document, &self.name);
        }

        log::error!("Document {} not found in {}", id, self.name);
        Err(PolyglotError::new(
            &format!("Document {} not found", id),
            ErrorKind::NotFound,
        ))
    }

    fn custom_update(&self, update: &Document, filter: &Filter) -> PolyglotResult<usize> {
        let mut documents = self.documents.write();
        let mut affected = 0;
        for stored in documents.values_mut() {
            if filter.apply(stored)? {
                apply_update(stored, update);
                affected += 1;
            }
        }
        log::debug!("Custom update {} touched {} document(s) in {}", filter, affected, self.name);
        Ok(affected)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn insert_new(
    documents: &mut IndexMap<String, Document>,
    mut document: Document,
    collection: &str,
) -> PolyglotResult<Document> {
    let id = match document.field(DOC_ID) {
        None | Some(Value::Null) => {
            let id = uuid::Uuid::new_v4().to_string();
            document.insert(DOC_ID, Value::from(id.as_str()));
            id
        }
        Some(_) => document.id().ok_or_else(|| {
            log::error!("Invalid document id in {}", collection);
            PolyglotError::new("Document id must be a non-empty string or integer", ErrorKind::InvalidId)
        })?,
    };

    if documents.contains_key(&id) {
        log::error!("Document {} already exists in {}", id, collection);
        return Err(PolyglotError::new(
            &format!("Document {} already exists", id),
            ErrorKind::InvalidOperation,
        ));
    }

    let now = now_millis();
    document.insert(CREATE_TIME, Value::I64(now));
    document.insert(LAST_UPDATE_TIME, Value::I64(now));
    document.insert(VERSION, Value::I64(1));

    documents.insert(id.clone(), document.clone());
    log::debug!("Created document {} in {}", id, collection);
    Ok(document)
}

// `$set`-style write: submitted top-level fields replace stored ones
fn apply_update(stored: &mut Document, update: &Document) {
    let version = stored
        .field(VERSION)
        .and_then(Value::as_integer)
        .unwrap_or(0);

    for (key, value) in update.iter() {
        if key == DOC_ID || key == CREATE_TIME || key == VERSION {
            continue;
        }
        stored.insert(key.clone(), value.clone());
    }

    stored.insert(VERSION, Value::I64(version + 1));
    stored.insert(LAST_UPDATE_TIME, Value::I64(now_millis()));
}

fn sort_documents(documents: &mut [Document], sort: &SortableFields) {
    documents.sort_by(|a, b| {
        for (field_name, order) in sort.sorting_order() {
            let left = a.get(field_name).unwrap_or_default();
            let right = b.get(field_name).unwrap_or_default();
            let ordering = match order {
                SortOrder::Ascending => left.cmp(&right),
                SortOrder::Descending => right.cmp(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn build_subtree(
    parent: &str,
    by_parent: &HashMap<String, Vec<Document>>,
    visited: &mut HashSet<String>,
) -> Vec<Document> {
    let Some(nodes) = by_parent.get(parent) else {
        return Vec::new();
    };

    let mut children = Vec::with_capacity(nodes.len());
    for node in nodes {
        let Some(id) = node.id() else { continue };
        // a record reachable twice means the parent links form a cycle
        if !visited.insert(id.clone()) {
            log::warn!("Skipping document {} already placed in the tree", id);
            continue;
        }

        let grand_children = build_subtree(&id, by_parent, visited)
            .into_iter()
            .map(Value::Document)
            .collect();
        let mut node = node.clone();
        node.insert(CHILDREN, Value::Array(grand_children));
        children.push(node);
    }
    children
}
