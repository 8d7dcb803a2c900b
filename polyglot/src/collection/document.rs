use im::OrdMap;

use crate::common::{Value, DOC_ID, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, PolyglotError, PolyglotResult};
use itertools::Itertools;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// A stored record: string keys mapped to [Value]s.
///
/// Documents nest: a key of a nested record is addressed with the field
/// separator (`.`), so for `{"a": {"b": 1}}` the inner value is reachable via
/// `document.get("a.b")`. Array elements are addressed by index (`"tags.0"`).
///
/// A localized document keeps every locale's content in one record:
///
/// ```text
/// {
///   "id": "42",
///   "nativeLanguage": "en",
///   "i18n": {
///     "en": { "title": "Hello" },
///     "fr": { "title": "Bonjour" }
///   }
/// }
/// ```
///
/// The backing `im::OrdMap` is a persistent map, so cloning a document is
/// O(1) and mutations share structure with the original.
#[derive(
    Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document { data: OrdMap::new() }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// Embedded keys (`"seo.title"`) create the intermediate records as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key, or any segment of an embedded key, is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("title", "Hello")?;
    /// doc.put("seo.keywords", vec!["greeting"])?;
    /// assert_eq!(doc.get("title")?, Value::from("Hello"));
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> PolyglotResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(PolyglotError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();
        if key.contains(FIELD_SEPARATOR) {
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_put(&splits, value)
        } else {
            self.data = self.data.update(key.into_owned(), value);
            Ok(())
        }
    }

    /// Returns the [Value] for the key, or [Value::Null] if there is none.
    ///
    /// Top-level keys are looked up first; otherwise an embedded key is
    /// resolved through nested records and array indices. A non-numeric
    /// segment applied to an array collects that field from every element.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty key segment or an out-of-range array index.
    pub fn get(&self, key: &str) -> PolyglotResult<Value> {
        match self.data.get(key) {
            Some(value) => Ok(value.clone()),
            None if key.contains(FIELD_SEPARATOR) => self.deep_get(key),
            None => Ok(Value::Null),
        }
    }

    /// Borrows the value of a top-level key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns the string identity of this document, if it has one.
    pub fn id(&self) -> Option<String> {
        match self.data.get(DOC_ID) {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::I32(id)) => Some(id.to_string()),
            Some(Value::I64(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Checks if this document carries an identity.
    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Removes a top-level key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Returns a copy of this document without the given top-level key.
    pub fn without(&self, key: &str) -> Document {
        Document {
            data: self.data.without(key),
        }
    }

    /// Keeps only the top-level entries for which the predicate holds.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&str, &Value) -> bool,
    {
        self.data = self
            .data
            .iter()
            .filter(|(k, v)| predicate(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
    }

    /// Returns the number of top-level entries.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Checks if a top level key exists in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Iterates over the top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Iterates over the top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Converts this document to a [BTreeMap].
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Builds a document from a map of top-level entries.
    pub fn from_map(map: BTreeMap<String, Value>) -> Self {
        map.into_iter().collect()
    }

    // keys come from an existing document, so they are already validated
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let mut json_string = String::with_capacity(self.data.len() * 30 + indent * 2);
        json_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            json_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_pretty_json(indent + 2)
            ));
        }

        json_string.pop();
        json_string.pop();
        json_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        json_string
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let mut debug_string = String::from("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            debug_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_debug_string(indent + 2)
            ));
        }

        debug_string.pop();
        debug_string.pop();
        debug_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        debug_string
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> PolyglotResult<()> {
        let Some((&key, remaining)) = splits.split_first() else {
            log::error!("Empty embedded key");
            return Err(PolyglotError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        };

        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(PolyglotError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        if remaining.is_empty() {
            self.data = self.data.update(key.to_string(), value);
            return Ok(());
        }

        // descend into the existing record, or start a fresh one
        let mut nested = match self.data.get(key) {
            Some(Value::Document(obj)) => obj.clone(),
            _ => Document::new(),
        };
        let result = nested.deep_put(remaining, value);
        self.data = self.data.update(key.to_string(), Value::Document(nested));
        result
    }

    fn deep_get(&self, key: &str) -> PolyglotResult<Value> {
        let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
        let Some((&first, remaining)) = splits.split_first() else {
            return Ok(Value::Null);
        };

        if first.is_empty() {
            log::error!("Document does not support empty key");
            return Err(PolyglotError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        self.recursive_get(self.data.get(first), remaining)
    }

    fn recursive_get(&self, value: Option<&Value>, splits: &[&str]) -> PolyglotResult<Value> {
        let Some(value) = value else {
            return Ok(Value::Null);
        };

        let Some((&key, remaining)) = splits.split_first() else {
            return Ok(value.clone());
        };

        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(PolyglotError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        match value {
            Value::Document(obj) => self.recursive_get(obj.data.get(key), remaining),
            Value::Array(arr) => match key.parse::<usize>() {
                Ok(index) => match arr.get(index) {
                    Some(item) => self.recursive_get(Some(item), remaining),
                    None => {
                        log::error!("Array index {} out of bound", index);
                        Err(PolyglotError::new(
                            &format!("Array index {} out of bound", index),
                            ErrorKind::ValidationError,
                        ))
                    }
                },
                Err(_) => self.decompose(arr, splits),
            },
            _ => Ok(Value::Null),
        }
    }

    fn decompose(&self, arr: &[Value], splits: &[&str]) -> PolyglotResult<Value> {
        let mut items: Vec<Value> = Vec::with_capacity(arr.len());
        for item in arr {
            match self.recursive_get(Some(item), splits)? {
                Value::Array(values) => items.extend(values),
                Value::Null => {}
                value => items.push(value),
            }
        }
        Ok(Value::Array(items.into_iter().unique().collect()))
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a Polyglot [Document] with JSON-like syntax.
///
/// Panics if a key is empty; intended for literals in code and tests.
///
/// # Examples
///
/// ```rust
/// use polyglot::doc;
///
/// let empty = doc!{};
///
/// let article = doc!{
///     id: "42",
///     nativeLanguage: "en",
///     i18n: {
///         en: { title: "Hello", tags: ["greeting"] },
///     },
/// };
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
