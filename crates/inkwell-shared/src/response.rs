//! Error bodies returned by the API.
//!
//! Validation failures use a field-keyed `errors` map so clients can show
//! every message; all other failures use RFC 7807 problem details.

use serde::{Deserialize, Serialize};

use inkwell_core::domain::ValidationErrors;

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,

    pub title: String,

    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

/// Body of a 422 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    /// First message, with a count of the rest.
    pub message: String,
    pub errors: ValidationErrors,
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        let first = errors
            .messages()
            .next()
            .unwrap_or("The given data was invalid.")
            .to_string();
        let message = match errors.count().saturating_sub(1) {
            0 => first,
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        };

        Self { message, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_shape() {
        let json = serde_json::to_value(ErrorResponse::not_found("Post not found")).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 404);
        assert_eq!(json["detail"], "Post not found");
    }

    #[test]
    fn test_validation_message_summarises_extra_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "The title field is required.");
        let single = ValidationErrorResponse::from(errors.clone());
        assert_eq!(single.message, "The title field is required.");

        errors.add("body", "The body field is required.");
        let double = ValidationErrorResponse::from(errors);
        assert_eq!(
            double.message,
            "The title field is required. (and 1 more error)"
        );
    }

    #[test]
    fn test_validation_body_shape() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "The title field is required.");

        let json = serde_json::to_value(ValidationErrorResponse::from(errors)).unwrap();
        assert_eq!(json["errors"]["title"][0], "The title field is required.");
    }
}
