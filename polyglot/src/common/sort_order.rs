use smallvec::SmallVec;

/// Specifies the direction for sorting documents.
///
/// Used with [sort_by] when listing a collection:
/// ```text
/// let sort = sort_by("orderValue", SortOrder::Ascending);
/// let list = collection.get_list(None, Some(&sort), None, None)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}

/// An ordered list of `(field, direction)` pairs; earlier fields take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortableFields {
    fields: SmallVec<[(String, SortOrder); 4]>,
}

impl SortableFields {
    pub fn new() -> Self {
        SortableFields::default()
    }

    pub fn add_sorted_field(mut self, field_name: &str, sort_order: SortOrder) -> Self {
        self.fields.push((field_name.to_string(), sort_order));
        self
    }

    pub fn sorting_order(&self) -> &[(String, SortOrder)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Creates [SortableFields] sorting by a single field.
pub fn sort_by(field_name: &str, sort_order: SortOrder) -> SortableFields {
    SortableFields::new().add_sorted_field(field_name, sort_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_keeps_insertion_order() {
        let sort = sort_by("orderValue", SortOrder::Ascending)
            .add_sorted_field("text", SortOrder::Descending);
        assert_eq!(
            sort.sorting_order(),
            &[
                ("orderValue".to_string(), SortOrder::Ascending),
                ("text".to_string(), SortOrder::Descending),
            ]
        );
        assert!(!sort.is_empty());
        assert!(SortableFields::new().is_empty());
    }
}
