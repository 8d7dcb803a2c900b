use itertools::{Either, Itertools};
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

use crate::collection::Document;
use crate::common::GLOBAL_NON_LOCALIZABLE_FIELDS;

/// Splits document fields into metadata and localizable content.
///
/// Metadata fields (identity, lifecycle, publication state, tree linkage and
/// the localization bookkeeping itself) are the same in every locale and are
/// never stored under `i18n`. Every other field is localizable.
///
/// The metadata set is the global list [GLOBAL_NON_LOCALIZABLE_FIELDS] plus
/// the fields a concrete collection adds. It is computed on first use and
/// cached for the lifetime of the classifier.
///
/// # Examples
///
/// ```rust
/// use polyglot::doc;
/// use polyglot::i18n::FieldClassifier;
///
/// let classifier = FieldClassifier::with_fields(["blockId"]);
/// assert!(classifier.is_metadata("parentId"));
/// assert!(classifier.is_metadata("blockId"));
/// assert!(classifier.is_localizable("title"));
///
/// let (metadata, content) = classifier.partition(&doc! { id: "1", title: "Hi" });
/// assert_eq!(metadata, doc! { id: "1" });
/// assert_eq!(content, doc! { title: "Hi" });
/// ```
#[derive(Debug, Default)]
pub struct FieldClassifier {
    extra_fields: Vec<String>,
    metadata_fields: OnceCell<BTreeSet<String>>,
}

impl FieldClassifier {
    /// Creates a classifier using only the global metadata fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier with collection-specific metadata fields on top
    /// of the global ones.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldClassifier {
            extra_fields: fields.into_iter().map(Into::into).collect(),
            metadata_fields: OnceCell::new(),
        }
    }

    /// The collection-specific additions.
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    /// The complete metadata set.
    pub fn metadata_fields(&self) -> &BTreeSet<String> {
        self.metadata_fields.get_or_init(|| {
            GLOBAL_NON_LOCALIZABLE_FIELDS
                .iter()
                .map(|field| field.to_string())
                .chain(self.extra_fields.iter().cloned())
                .collect()
        })
    }

    pub fn is_metadata(&self, field: &str) -> bool {
        self.metadata_fields().contains(field)
    }

    pub fn is_localizable(&self, field: &str) -> bool {
        !self.is_metadata(field)
    }

    /// Returns a copy of `document` holding only its metadata fields.
    pub fn reduce_to_metadata(&self, document: &Document) -> Document {
        let mut reduced = document.clone();
        reduced.retain(|key, _| self.is_metadata(key));
        reduced
    }

    /// Returns a copy of `document` holding only its localizable fields.
    pub fn strip_metadata(&self, document: &Document) -> Document {
        let mut stripped = document.clone();
        stripped.retain(|key, _| self.is_localizable(key));
        stripped
    }

    /// Splits `document` into `(metadata, localizable)`.
    ///
    /// Every field ends up in exactly one of the two halves.
    pub fn partition(&self, document: &Document) -> (Document, Document) {
        let (metadata, localizable): (Vec<_>, Vec<_>) =
            document.iter().partition_map(|(key, value)| {
                let entry = (key.clone(), value.clone());
                if self.is_metadata(key) {
                    Either::Left(entry)
                } else {
                    Either::Right(entry)
                }
            });

        (
            metadata.into_iter().collect(),
            localizable.into_iter().collect(),
        )
    }
}
