//! Book model and request payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Assigned by the database on creation
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    /// Ignored; the database assigns the id
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub description: Option<String>,
}

/// Update book request
///
/// Every field is optional. A field that is missing, `null` or an empty
/// string keeps the stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    /// Ignored; the target id comes from the path
    #[serde(default)]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Fields to overwrite on a stored book. `None` leaves the column untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.description.is_none()
    }
}

impl From<UpdateBook> for BookChanges {
    fn from(data: UpdateBook) -> Self {
        Self {
            title: non_empty(data.title),
            author: non_empty(data.author),
            description: non_empty(data.description),
        }
    }
}

// An empty string cannot be written through an update, it counts as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_skip_empty_strings() {
        let changes = BookChanges::from(UpdateBook {
            id: Some(42),
            title: Some(String::new()),
            author: None,
            description: Some("new".to_string()),
        });

        assert_eq!(
            changes,
            BookChanges {
                title: None,
                author: None,
                description: Some("new".to_string()),
            }
        );
    }

    #[test]
    fn test_changes_empty_payload() {
        assert!(BookChanges::from(UpdateBook::default()).is_empty());
    }

    #[test]
    fn test_create_requires_title_and_author() {
        let missing: Result<CreateBook, _> = serde_json::from_str(r#"{"title": "A"}"#);
        assert!(missing.is_err());

        let wrong_type: Result<CreateBook, _> =
            serde_json::from_str(r#"{"title": 1, "author": "B"}"#);
        assert!(wrong_type.is_err());

        let null_title: Result<CreateBook, _> =
            serde_json::from_str(r#"{"title": null, "author": "B"}"#);
        assert!(null_title.is_err());
    }

    #[test]
    fn test_create_rejects_empty_fields() {
        let book: CreateBook = serde_json::from_str(r#"{"title": "", "author": "B"}"#).unwrap();
        let errors = book.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let book: CreateBook =
            serde_json::from_str(r#"{"id": 7, "title": "A", "author": "B"}"#).unwrap();
        assert!(book.validate().is_ok());
        assert_eq!(book.description, None);
    }

    #[test]
    fn test_book_serializes_missing_description_as_null() {
        let book = Book {
            id: 1,
            title: "A".to_string(),
            author: "B".to_string(),
            description: None,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "title": "A", "author": "B", "description": null})
        );
    }
}
