use super::{merge, LocaleContext};
use crate::collection::Document;
use crate::common::{Value, I18N, NATIVE_LANGUAGE};
use crate::errors::{ErrorKind, PolyglotError, PolyglotResult};

/// Flattens a stored, multi-locale record into the content of one locale.
///
/// The locale is picked in this order:
///
/// 1. a record without `i18n` is returned unchanged (not localized yet);
/// 2. the working locale of the context, else the record's `nativeLanguage`;
///    with neither there is nothing to resolve and the record is returned
///    unchanged;
/// 3. when `i18n` has no entry for that locale, the record's native language;
/// 4. when that is missing too the record is corrupt and resolution fails
///    with [ErrorKind::IntegrityFault].
///
/// The chosen `i18n` entry is then merged onto the record with [merge], and
/// `i18n` itself is dropped unless the context keeps it.
///
/// # Examples
///
/// ```rust
/// use polyglot::doc;
/// use polyglot::common::Value;
/// use polyglot::i18n::{LocaleContext, LocaleResolver};
///
/// let ctx = LocaleContext::default().with_working_locale("fr");
/// let stored = doc! {
///     id: "1",
///     nativeLanguage: "en",
///     i18n: { en: { title: "Hi" }, fr: { title: "Salut" } },
/// };
///
/// let resolved = LocaleResolver::new(&ctx).resolve_document(stored).unwrap();
/// assert_eq!(resolved.get("title").unwrap(), Value::from("Salut"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocaleResolver<'a> {
    context: &'a LocaleContext,
}

impl<'a> LocaleResolver<'a> {
    pub fn new(context: &'a LocaleContext) -> Self {
        LocaleResolver { context }
    }

    /// Resolves an optional record; a missing record stays missing.
    pub fn resolve(&self, document: Option<Document>) -> PolyglotResult<Option<Document>> {
        document.map(|doc| self.resolve_document(doc)).transpose()
    }

    /// Resolves every record of a batch, failing on the first corrupt one.
    pub fn resolve_all(&self, documents: Vec<Document>) -> PolyglotResult<Vec<Document>> {
        documents
            .into_iter()
            .map(|doc| self.resolve_document(doc))
            .collect()
    }

    /// Resolves one record.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::IntegrityFault] when `i18n` is not a record, or
    /// when neither the requested locale nor the native language has an
    /// entry in it.
    pub fn resolve_document(&self, document: Document) -> PolyglotResult<Document> {
        let resolved = match self.select(&document)? {
            Some((locale, content)) => {
                log::debug!(
                    "Resolving document {} to locale {}",
                    document.id().unwrap_or_default(),
                    locale
                );
                Some(merge(&document, content))
            }
            None => None,
        };

        let Some(mut resolved) = resolved else {
            return Ok(document);
        };
        if !self.context.include_i18n() {
            resolved.remove(I18N);
        }
        Ok(resolved)
    }

    /// Returns the locale whose content [LocaleResolver::resolve_document]
    /// would surface, or `None` when the record is returned unchanged.
    pub fn target_locale(&self, document: &Document) -> PolyglotResult<Option<String>> {
        Ok(self
            .select(document)?
            .map(|(locale, _)| locale.to_string()))
    }

    fn select<'d>(&self, document: &'d Document) -> PolyglotResult<Option<(&'d str, &'d Document)>>
    where
        'a: 'd,
    {
        let Some(i18n) = i18n_of(document)? else {
            return Ok(None);
        };

        let native = native_language(document);
        let requested = match (self.context.working_locale(), native) {
            (Some(working), _) => working,
            (None, Some(native)) => native,
            (None, None) => {
                log::debug!(
                    "Document {} has no native language and no working locale is set",
                    document.id().unwrap_or_default()
                );
                return Ok(None);
            }
        };

        if let Some(content) = locale_entry(i18n, requested) {
            return Ok(Some((requested, content)));
        }

        let Some(native) = native else {
            log::error!("No defined native language for this item");
            return Err(PolyglotError::new(
                "No defined native language for this item",
                ErrorKind::IntegrityFault,
            ));
        };

        let Some(content) = locale_entry(i18n, native) else {
            log::error!("No localized data are available for this item");
            return Err(PolyglotError::new(
                "No localized data are available for this item",
                ErrorKind::IntegrityFault,
            ));
        };

        log::warn!(
            "Locale {} missing for document {}, falling back to {}",
            requested,
            document.id().unwrap_or_default(),
            native
        );
        Ok(Some((native, content)))
    }
}

/// The `i18n` map of a record, if it has one.
pub(crate) fn i18n_of(document: &Document) -> PolyglotResult<Option<&Document>> {
    match document.field(I18N) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Document(i18n)) => Ok(Some(i18n)),
        Some(_) => {
            log::error!("Malformed i18n field on document {}", document.id().unwrap_or_default());
            Err(PolyglotError::new(
                "The i18n field of this item is not a record",
                ErrorKind::IntegrityFault,
            ))
        }
    }
}

pub(crate) fn native_language(document: &Document) -> Option<&str> {
    match document.field(NATIVE_LANGUAGE) {
        Some(Value::String(locale)) if !locale.is_empty() => Some(locale),
        _ => None,
    }
}

fn locale_entry<'d>(i18n: &'d Document, locale: &str) -> Option<&'d Document> {
    match i18n.field(locale) {
        Some(Value::Document(content)) => Some(content),
        _ => None,
    }
}
