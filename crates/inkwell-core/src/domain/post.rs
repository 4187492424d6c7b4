use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationErrors;

/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Post entity - a blog post owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A submitted form field as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldInput {
    /// Absent or null.
    #[default]
    Missing,
    Text(String),
    /// Present but not a string.
    NotText,
}

/// A post as submitted by its author, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    /// Build a submission, trimming surrounding whitespace from both fields.
    pub fn new(title: impl AsRef<str>, body: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            body: body.as_ref().trim().to_string(),
        }
    }

    /// Validate raw form fields into a submission. Fields are checked title
    /// first, then body; every failure is reported.
    pub fn from_input(title: FieldInput, body: FieldInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(&mut errors, "title", title);
        if title
            .as_ref()
            .is_some_and(|t| t.chars().count() > TITLE_MAX_CHARS)
        {
            errors.add(
                "title",
                format!("The title field must not be greater than {TITLE_MAX_CHARS} characters."),
            );
        }
        let body = required_text(&mut errors, "body", body);

        errors.into_result()?;
        Ok(Self {
            title: title.unwrap_or_default(),
            body: body.unwrap_or_default(),
        })
    }

    /// Check the submission against the same rules as [`NewPost::from_input`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Self::from_input(
            FieldInput::Text(self.title.clone()),
            FieldInput::Text(self.body.clone()),
        )
        .map(|_| ())
    }
}

/// The trimmed text of a required string field, or `None` after recording why
/// it is unusable.
fn required_text(errors: &mut ValidationErrors, field: &str, input: FieldInput) -> Option<String> {
    match input {
        FieldInput::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        FieldInput::Text(_) | FieldInput::Missing => {
            errors.add(field, format!("The {field} field is required."));
            None
        }
        FieldInput::NotText => {
            errors.add(field, format!("The {field} field must be a string."));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_post_passes() {
        assert!(NewPost::new("Hello", "World").validate().is_ok());
    }

    #[test]
    fn test_missing_title_and_body() {
        let errors = NewPost::new("", "   ").validate().unwrap_err();

        assert_eq!(
            errors.field("title"),
            Some(&["The title field is required.".to_string()][..])
        );
        assert_eq!(
            errors.field("body"),
            Some(&["The body field is required.".to_string()][..])
        );
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[test]
    fn test_title_length_counts_characters() {
        let exactly = "é".repeat(TITLE_MAX_CHARS);
        assert!(NewPost::new(&exactly, "body").validate().is_ok());

        let too_long = "a".repeat(TITLE_MAX_CHARS + 1);
        let errors = NewPost::new(&too_long, "body").validate().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "The title field must not be greater than 255 characters."
        );
    }

    #[test]
    fn test_from_input_reports_type_and_presence_in_field_order() {
        let errors = NewPost::from_input(FieldInput::Missing, FieldInput::NotText).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "The title field is required., The body field must be a string."
        );

        let errors = NewPost::from_input(FieldInput::NotText, FieldInput::Missing).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[test]
    fn test_from_input_trims_text() {
        let post = NewPost::from_input(
            FieldInput::Text(" Hello ".to_string()),
            FieldInput::Text("World\n".to_string()),
        )
        .unwrap();
        assert_eq!(post, NewPost::new("Hello", "World"));
    }

    #[test]
    fn test_new_trims_input() {
        let post = NewPost::new("  Hello ", "\nWorld\n");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "World");
    }
}
