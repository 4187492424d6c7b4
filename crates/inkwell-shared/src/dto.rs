//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use inkwell_core::domain::{FieldInput, NewPost, Post, ValidationErrors};

/// Public part of a guest account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestUserResponse {
    pub id: i64,
    pub name: String,
}

/// Response to `POST /api/auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: GuestUserResponse,
}

/// Body of `POST /api/posts`, as the client sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Body of `POST /api/posts`, as the server accepts it.
///
/// Fields are taken as arbitrary JSON so that missing, null and non-string
/// values reach validation and come back as field errors instead of failing
/// extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl CreatePostForm {
    pub fn into_new_post(self) -> Result<NewPost, ValidationErrors> {
        NewPost::from_input(field_input(self.title), field_input(self.body))
    }
}

fn field_input(value: Option<Value>) -> FieldInput {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::String(text)) => FieldInput::Text(text),
        Some(_) => FieldInput::NotText,
    }
}

/// A post as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Response to a successful `POST /api/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: PostResponse,
}

/// Bare acknowledgement, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_fields_default_to_empty() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(req.title, "Only title");
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_form_maps_null_and_non_string_to_field_errors() {
        let form: CreatePostForm =
            serde_json::from_str(r#"{"title":null,"body":42}"#).unwrap();
        let errors = form.into_new_post().unwrap_err();

        assert_eq!(
            errors.to_string(),
            "The title field is required., The body field must be a string."
        );
    }

    #[test]
    fn test_form_accepts_client_request() {
        let request = CreatePostRequest {
            title: " Hello ".to_string(),
            body: "World".to_string(),
        };
        let form: CreatePostForm =
            serde_json::from_value(serde_json::to_value(&request).unwrap()).unwrap();

        let post = form.into_new_post().unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "World");
    }

    #[test]
    fn test_post_response_from_domain() {
        let now = Utc::now();
        let post = Post {
            id: 7,
            user_id: 3,
            title: "Hello".to_string(),
            content: "World".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["user_id"], 3);
        assert_eq!(json["content"], "World");
    }
}
