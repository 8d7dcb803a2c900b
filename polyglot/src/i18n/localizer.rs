use super::resolver::{i18n_of, native_language};
use super::{merge, FieldClassifier, LocaleContext};
use crate::collection::Document;
use crate::common::{Value, I18N, LOCALE, NATIVE_LANGUAGE, READ_ONLY};
use crate::errors::PolyglotResult;

/// Removes the `readOnly` marker clients attach to records they display.
pub fn strip_read_only(document: &Document) -> Document {
    document.without(READ_ONLY)
}

/// Reduces a submitted record to its metadata fields.
///
/// This is what the plain update path persists: localizable fields of the
/// submission never reach storage.
pub fn localize_input(classifier: &FieldClassifier, document: &Document) -> Document {
    classifier.reduce_to_metadata(document)
}

/// Moves the localizable content of a record under `i18n`.
///
/// A record that already has a `nativeLanguage` is returned unchanged, so
/// seeding twice is the same as seeding once. Otherwise the localizable
/// fields, stamped with `locale`, become the `i18n` entry of the context's
/// default locale, the top level keeps only metadata, and `nativeLanguage`
/// is set to the default locale.
///
/// # Examples
///
/// ```rust
/// use polyglot::doc;
/// use polyglot::i18n::{add_localization, FieldClassifier, LocaleContext};
///
/// let seeded = add_localization(
///     &FieldClassifier::new(),
///     &LocaleContext::default(),
///     &doc! { id: "1", title: "Hello" },
/// );
/// assert_eq!(
///     seeded,
///     doc! { id: "1", nativeLanguage: "en", i18n: { en: { title: "Hello", locale: "en" } } }
/// );
/// ```
pub fn add_localization(
    classifier: &FieldClassifier,
    context: &LocaleContext,
    document: &Document,
) -> Document {
    if is_localized(document) {
        return document.clone();
    }

    let default_locale = context.default_locale();
    let mut native_content = classifier.strip_metadata(document);
    native_content.insert(LOCALE, Value::from(default_locale));

    let mut i18n = Document::new();
    i18n.insert(default_locale, Value::Document(native_content));

    let mut localized = classifier.reduce_to_metadata(document);
    localized.insert(NATIVE_LANGUAGE, Value::from(default_locale));
    localized.insert(I18N, Value::Document(i18n));
    localized
}

/// Checks whether a record has been through [add_localization].
///
/// Any non-null `nativeLanguage` counts, including an empty string or a
/// non-string value. Such a record is left alone by seeding, which would
/// otherwise replace its `i18n` entries, while reads treat it as having no
/// native language.
pub fn is_localized(document: &Document) -> bool {
    !matches!(document.field(NATIVE_LANGUAGE), None | Some(Value::Null))
}

/// Writes the localizable fields of `submitted` into `i18n[locale]` of an
/// already localized `stored` record.
///
/// The submitted content is merged over the existing entry for that locale.
/// Other locale entries and the stored `nativeLanguage` are kept; every
/// other metadata field is taken from the submission.
pub fn merge_localized_input(
    classifier: &FieldClassifier,
    stored: &Document,
    submitted: &Document,
    locale: &str,
) -> PolyglotResult<Document> {
    let (mut localized, mut content) = classifier.partition(submitted);
    content.insert(LOCALE, Value::from(locale));

    let mut i18n = i18n_of(stored)?.cloned().unwrap_or_default();
    let entry = match i18n.field(locale) {
        Some(Value::Document(existing)) => merge(existing, &content),
        _ => content,
    };
    i18n.insert(locale, Value::Document(entry));

    localized.insert(I18N, Value::Document(i18n));
    match native_language(stored) {
        Some(native) => localized.insert(NATIVE_LANGUAGE, Value::from(native)),
        None => {
            localized.remove(NATIVE_LANGUAGE);
        }
    }
    Ok(localized)
}
