use crate::common::Value;

use super::{EqualsFilter, Filter, InFilter, NotEqualsFilter};

/// Creates a fluent filter builder for the specified field name.
///
/// Embedded field names are supported: `field("i18n.en.title")`.
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Matches documents where the field equals the value.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field_name, value.into()))
    }

    /// Matches documents where the field does not equal the value.
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(NotEqualsFilter::new(self.field_name, value.into()))
    }

    /// Matches documents where the field equals any of the values.
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        Filter::new(InFilter::new(
            self.field_name,
            values.into_iter().map(Into::into).collect(),
        ))
    }
}
