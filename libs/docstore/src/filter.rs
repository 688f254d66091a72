use bson::{Bson, Document};

/// Query filter understood by every backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection.
    All,
    /// `field == value`; when the stored field is an array, any equal element matches.
    Eq { field: String, value: Bson },
}

impl Filter {
    pub fn all() -> Self {
        Filter::All
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluate the filter against a document held in memory.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => match document.get(field) {
                Some(Bson::Array(items)) => {
                    items.contains(value) || matches!(value, Bson::Array(v) if v == items)
                }
                Some(stored) => stored == value,
                // missing field behaves like null
                None => matches!(value, Bson::Null),
            },
        }
    }

    /// Query document for a document database.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Eq { field, value } => {
                let mut query = Document::new();
                query.insert(field.clone(), value.clone());
                query
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn all_matches_anything() {
        assert!(Filter::all().matches(&Document::new()));
        assert!(Filter::all().to_document().is_empty());
    }

    #[test]
    fn eq_on_scalar_field() {
        let d = doc! { "name": "comedy" };
        assert!(Filter::eq("name", "comedy").matches(&d));
        assert!(!Filter::eq("name", "drama").matches(&d));
        assert!(!Filter::eq("title", "comedy").matches(&d));
    }

    #[test]
    fn eq_on_array_field_means_contains() {
        let d = doc! { "genre": ["comedy", "drama"] };
        assert!(Filter::eq("genre", "drama").matches(&d));
        assert!(!Filter::eq("genre", "horror").matches(&d));
        assert!(Filter::eq("genre", vec!["comedy", "drama"]).matches(&d));
    }

    #[test]
    fn eq_null_matches_missing_field() {
        assert!(Filter::eq("deleted", Bson::Null).matches(&doc! { "name": "x" }));
    }

    #[test]
    fn eq_renders_as_query_document() {
        assert_eq!(
            Filter::eq("genre", "comedy").to_document(),
            doc! { "genre": "comedy" }
        );
    }
}
