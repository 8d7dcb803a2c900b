use std::fmt::Display;

use crate::collection::Document;
use crate::common::{Value, DOC_ID};
use crate::errors::PolyglotResult;

use super::FilterProvider;

/// A filter that matches all documents.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> PolyglotResult<bool> {
        Ok(true)
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// Matches documents whose field equals a value. Embedded field names
/// (`"i18n.en.title"`) are resolved through nested records.
pub(crate) struct EqualsFilter {
    field_name: String,
    field_value: Value,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        EqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> PolyglotResult<bool> {
        let value = entry.get(&self.field_name)?;
        Ok(value == self.field_value)
    }
}

/// Matches documents by identity. String and integer ids compare on their
/// text form, so `"7"` finds a record stored with `id: 7`.
pub(crate) struct IdFilter {
    id: String,
}

impl IdFilter {
    #[inline]
    pub(crate) fn new(id: String) -> Self {
        IdFilter { id }
    }
}

impl Display for IdFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", DOC_ID, Value::from(self.id.as_str()))
    }
}

impl FilterProvider for IdFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> PolyglotResult<bool> {
        Ok(entry.id().as_deref() == Some(self.id.as_str()))
    }
}

/// Matches documents whose field differs from a value; a missing field differs.
pub(crate) struct NotEqualsFilter {
    field_name: String,
    field_value: Value,
}

impl NotEqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        NotEqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> PolyglotResult<bool> {
        let value = entry.get(&self.field_name)?;
        Ok(value != self.field_value)
    }
}

/// Matches documents whose field equals any of the given values.
pub(crate) struct InFilter {
    field_name: String,
    field_values: Vec<Value>,
}

impl InFilter {
    pub(crate) fn new(field_name: String, field_values: Vec<Value>) -> Self {
        InFilter {
            field_name,
            field_values,
        }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.field_values.iter().map(|v| v.to_string()).collect();
        write!(f, "({} in [{}])", self.field_name, values.join(", "))
    }
}

impl FilterProvider for InFilter {
    fn apply(&self, entry: &Document) -> PolyglotResult<bool> {
        let value = entry.get(&self.field_name)?;
        Ok(self.field_values.contains(&value))
    }
}
