//! Field-level validation errors.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered map of field name to the messages produced for that field.
///
/// Iteration order is insertion order, which is the order fields were
/// checked in. Clients rely on that order when flattening messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a single field.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Iterate fields and their messages in recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All messages, field by field.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    /// Total number of messages across all fields.
    pub fn count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.messages().collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl FromIterator<(String, Vec<String>)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_field_order() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "first");
        errors.add("body", "second");
        errors.add("title", "third");

        let messages: Vec<&str> = errors.messages().collect();
        assert_eq!(messages, vec!["first", "third", "second"]);
        assert_eq!(errors.count(), 3);
        assert_eq!(errors.to_string(), "first, third, second");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "The title field is required.");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"title":["The title field is required."]}"#);
    }

    #[test]
    fn test_deserialize_preserves_server_order() {
        let errors: ValidationErrors =
            serde_json::from_str(r#"{"title":["a"],"body":["b"]}"#).unwrap();
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[test]
    fn test_empty_into_result_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
