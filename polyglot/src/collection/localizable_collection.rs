use std::collections::BTreeSet;
use std::sync::Arc;

use super::{Collection, Document, ListResult, WriteOptions};
use crate::common::SortableFields;
use crate::errors::{ErrorKind, PolyglotError, PolyglotResult};
use crate::filter::Filter;
use crate::i18n::{
    add_localization, localize_input, merge_localized_input, native_language, strip_read_only,
    FieldClassifier, LocaleContext, LocaleResolver, LocalizationMigration, MigrationReport,
};

/// A collection whose reads come back in one locale.
///
/// `LocalizableCollection` wraps a base [Collection]. Stored records keep the
/// content of every locale under `i18n`; every read path resolves them to
/// the working locale of the collection's [LocaleContext] (falling back to
/// each record's native language) before handing them out. Filters and sorts
/// are passed to the base collection untouched and therefore apply to the
/// stored records.
///
/// Writes come in two flavours:
///
/// - [LocalizableCollection::update] persists only the metadata fields of the
///   submission. Localizable edits are dropped.
/// - [LocalizableCollection::update_localized] also writes the localizable
///   fields into the `i18n` entry of the working locale.
///
/// Cloning is cheap. Clones and [LocalizableCollection::with_context] views
/// share the base collection and the field classifier.
///
/// # Examples
///
/// ```rust,ignore
/// use polyglot::collection::{Collection, InMemoryCollection, LocalizableCollection, WriteOptions};
/// use polyglot::doc;
///
/// let pages = LocalizableCollection::builder(Collection::new(InMemoryCollection::new("pages")))
///     .non_localizable_fields(["blockId"])
///     .build();
///
/// let stored = pages.create(doc!{ title: "Hello" }, &WriteOptions::default())?;
/// let seeded = pages.add_localization(&stored);
///
/// let fr = pages.with_context(pages.context().clone().with_working_locale("fr"));
/// let page = fr.find_by_id(&stored.id().unwrap(), false)?;
/// ```
#[derive(Clone)]
pub struct LocalizableCollection {
    inner: Collection,
    classifier: Arc<FieldClassifier>,
    context: LocaleContext,
}

impl LocalizableCollection {
    /// Wraps `inner` with the global metadata fields and a default context.
    pub fn new(inner: Collection) -> Self {
        Self::builder(inner).build()
    }

    pub fn builder(inner: Collection) -> LocalizableCollectionBuilder {
        LocalizableCollectionBuilder::new(inner)
    }

    /// Returns a view with its own localization switches over the same
    /// base collection.
    pub fn with_context(&self, context: LocaleContext) -> Self {
        LocalizableCollection {
            inner: self.inner.clone(),
            classifier: self.classifier.clone(),
            context,
        }
    }

    /// The wrapped base collection.
    pub fn inner(&self) -> &Collection {
        &self.inner
    }

    pub fn name(&self) -> String {
        self.inner.name()
    }

    pub fn context(&self) -> &LocaleContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut LocaleContext {
        &mut self.context
    }

    pub fn default_locale(&self) -> &str {
        self.context.default_locale()
    }

    pub fn set_default_locale(&mut self, locale: &str) -> PolyglotResult<()> {
        self.context.set_default_locale(locale)
    }

    pub fn working_locale(&self) -> Option<&str> {
        self.context.working_locale()
    }

    pub fn set_working_locale(&mut self, locale: Option<&str>) -> PolyglotResult<()> {
        self.context.set_working_locale(locale)
    }

    pub fn include_i18n(&self) -> bool {
        self.context.include_i18n()
    }

    pub fn set_include_i18n(&mut self, include_i18n: bool) {
        self.context.set_include_i18n(include_i18n)
    }

    /// The metadata fields of this collection: the global set plus the
    /// collection-specific additions.
    pub fn metadata_fields(&self) -> &BTreeSet<String> {
        self.classifier.metadata_fields()
    }

    /// Splits a record into `(metadata, localizable)` fields.
    pub fn split_fields(&self, document: &Document) -> (Document, Document) {
        self.classifier.partition(document)
    }

    fn resolver(&self) -> LocaleResolver<'_> {
        LocaleResolver::new(&self.context)
    }

    /// Lists records resolved to the working locale. `total` counts the
    /// matches before paging.
    pub fn get_list(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
        start: Option<usize>,
        limit: Option<usize>,
    ) -> PolyglotResult<ListResult> {
        let resolver = self.resolver();
        self.inner
            .get_list(filter, sort, start, limit)?
            .try_map(|document| resolver.resolve_document(document))
    }

    /// Lists stored records as they are, without resolution.
    pub fn get_raw_list(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
        start: Option<usize>,
        limit: Option<usize>,
    ) -> PolyglotResult<ListResult> {
        self.inner.get_list(filter, sort, start, limit)
    }

    pub fn find_by_id(&self, id: &str, force_reload: bool) -> PolyglotResult<Option<Document>> {
        let document = self.inner.find_by_id(id, force_reload)?;
        self.resolver().resolve(document)
    }

    /// Finds a stored record as it is, without resolution.
    pub fn find_raw_by_id(&self, id: &str, force_reload: bool) -> PolyglotResult<Option<Document>> {
        self.inner.find_by_id(id, force_reload)
    }

    pub fn find_by_name(&self, name: &str) -> PolyglotResult<Option<Document>> {
        let document = self.inner.find_by_name(name)?;
        self.resolver().resolve(document)
    }

    pub fn find_one(&self, filter: &Filter) -> PolyglotResult<Option<Document>> {
        let document = self.inner.find_one(filter)?;
        self.resolver().resolve(document)
    }

    pub fn read_child(
        &self,
        parent_id: &str,
        filter: Option<&Filter>,
        sort: Option<&SortableFields>,
    ) -> PolyglotResult<Vec<Document>> {
        let children = self.inner.read_child(parent_id, filter, sort)?;
        self.resolver().resolve_all(children)
    }

    /// Returns the top-level nodes of the tree.
    ///
    /// Nodes are returned as stored; tree reads are not resolved.
    pub fn read_tree(&self, filter: Option<&Filter>) -> PolyglotResult<Vec<Document>> {
        Ok(self.inner.read_tree(filter)?.into_children())
    }

    /// Stores a new record. Only the `readOnly` marker is removed; the
    /// record is not localized.
    pub fn create(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document> {
        self.inner.create(strip_read_only(&document), options)
    }

    /// Updates the metadata fields of a record.
    ///
    /// The submission is reduced to its metadata fields before it reaches
    /// the base collection, so localizable edits are discarded. Use
    /// [LocalizableCollection::update_localized] to write content.
    pub fn update(&self, document: Document, options: &WriteOptions) -> PolyglotResult<Document> {
        let document = localize_input(&self.classifier, &strip_read_only(&document));
        self.inner.update(document, options)
    }

    /// Updates a record, writing its localizable fields into the `i18n`
    /// entry of the working locale, or of the record's native language when
    /// no working locale is set.
    ///
    /// A stored record that is not localized yet is seeded first. Other
    /// locale entries and the stored native language are kept. The updated
    /// record is returned resolved.
    ///
    /// # Errors
    ///
    /// - [ErrorKind::InvalidId] if the submission has no id
    /// - [ErrorKind::NotFound] if no record has that id
    /// - [ErrorKind::IntegrityFault] if the stored record has no usable
    ///   native language
    pub fn update_localized(
        &self,
        document: Document,
        options: &WriteOptions,
    ) -> PolyglotResult<Document> {
        let submitted = strip_read_only(&document);
        let Some(id) = submitted.id() else {
            log::error!("Cannot update a localized record without id in {}", self.name());
            return Err(PolyglotError::new(
                "Cannot update a localized record without id",
                ErrorKind::InvalidId,
            ));
        };

        let Some(stored) = self.inner.find_by_id(&id, true)? else {
            log::error!("Record {} not found in {}", id, self.name());
            return Err(PolyglotError::new(
                &format!("Record {} not found", id),
                ErrorKind::NotFound,
            ));
        };

        let stored = add_localization(&self.classifier, &self.context, &stored);
        let locale = match self.context.working_locale() {
            Some(locale) => locale.to_string(),
            None => match native_language(&stored) {
                Some(native) => native.to_string(),
                None => {
                    log::error!("No defined native language for this item");
                    return Err(PolyglotError::new(
                        "No defined native language for this item",
                        ErrorKind::IntegrityFault,
                    ));
                }
            },
        };

        log::debug!("Writing locale {} of record {} in {}", locale, id, self.name());
        let localized = merge_localized_input(&self.classifier, &stored, &submitted, &locale)?;
        let updated = self.inner.update(localized, options)?;
        self.resolver().resolve_document(updated)
    }

    pub fn count(&self, filter: Option<&Filter>) -> PolyglotResult<usize> {
        self.inner.count(filter)
    }

    /// Moves the localizable content of `document` under `i18n` for the
    /// default locale. Records with a native language are returned as is.
    pub fn add_localization(&self, document: &Document) -> Document {
        add_localization(&self.classifier, &self.context, document)
    }

    /// Seeds localization on every record of the base collection, user
    /// filtering aside. See [LocalizationMigration].
    pub fn add_localization_for_collection(&self) -> PolyglotResult<MigrationReport> {
        LocalizationMigration::new(
            self.inner.clone(),
            self.classifier.clone(),
            self.context.clone(),
        )
        .run()
    }
}

/// Builder for [LocalizableCollection].
pub struct LocalizableCollectionBuilder {
    inner: Collection,
    non_localizable_fields: Vec<String>,
    context: LocaleContext,
}

impl LocalizableCollectionBuilder {
    fn new(inner: Collection) -> Self {
        LocalizableCollectionBuilder {
            inner,
            non_localizable_fields: Vec::new(),
            context: LocaleContext::default(),
        }
    }

    /// Adds collection-specific metadata fields to the global set.
    pub fn non_localizable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_localizable_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn context(mut self, context: LocaleContext) -> Self {
        self.context = context;
        self
    }

    pub fn build(self) -> LocalizableCollection {
        LocalizableCollection {
            inner: self.inner,
            classifier: Arc::new(FieldClassifier::with_fields(self.non_localizable_fields)),
            context: self.context,
        }
    }
}
