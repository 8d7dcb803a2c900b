use crate::collection::Document;
use crate::common::Value;

/// Merges `overlay` onto `base` and returns the result.
///
/// For every key of `overlay`: when both sides hold a [Value::Document] the
/// two records are merged recursively; in every other case the overlay value
/// replaces the base value. [Value::Array]s are therefore always replaced as
/// a whole, never merged element by element. Keys only present in `base` are
/// kept unchanged.
///
/// Neither input is modified. The persistent map behind [Document] makes the
/// copy of `base` cheap.
///
/// # Examples
///
/// ```rust
/// use polyglot::doc;
/// use polyglot::i18n::merge;
///
/// let base = doc! { a: 1, b: { x: 1 }, tags: [1, 2] };
/// let overlay = doc! { b: { y: 2 }, tags: [3] };
///
/// assert_eq!(merge(&base, &overlay), doc! { a: 1, b: { x: 1, y: 2 }, tags: [3] });
/// ```
pub fn merge(base: &Document, overlay: &Document) -> Document {
    let mut merged = base.clone();
    for (key, value) in overlay.iter() {
        let value = match (base.field(key), value) {
            (Some(Value::Document(nested_base)), Value::Document(nested_overlay)) => {
                Value::Document(merge(nested_base, nested_overlay))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}
