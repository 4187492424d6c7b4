//! Client-side view of a post.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inkwell_shared::dto::PostResponse;

/// Temporary ids count down from -1. Server ids are positive, so the two
/// never collide.
static NEXT_TEMP_ID: AtomicI64 = AtomicI64::new(-1);

/// Allocate a process-unique temporary id for an optimistic post.
pub fn next_temp_id() -> i64 {
    NEXT_TEMP_ID.fetch_sub(1, Ordering::Relaxed)
}

/// A post as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while the post exists only locally, awaiting server confirmation.
    #[serde(rename = "_optimistic", default, skip_serializing_if = "is_false")]
    pub optimistic: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Post {
    /// An unconfirmed local post under a temporary id.
    pub fn optimistic(temp_id: i64, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: temp_id,
            title,
            content,
            created_at: now,
            updated_at: now,
            optimistic: true,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        !self.optimistic
    }
}

impl From<PostResponse> for Post {
    fn from(post: PostResponse) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            optimistic: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_ids_are_negative_and_distinct() {
        let a = next_temp_id();
        let b = next_temp_id();
        assert!(a < 0 && b < 0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_optimistic_marker_serialization() {
        let local = Post::optimistic(-1, "Hello".to_string(), "World".to_string());
        let json = serde_json::to_value(&local).unwrap();
        assert_eq!(json["_optimistic"], true);

        let confirmed = Post {
            optimistic: false,
            ..local
        };
        let json = serde_json::to_value(&confirmed).unwrap();
        assert!(json.get("_optimistic").is_none());
    }

    #[test]
    fn test_server_post_deserializes_as_confirmed() {
        let post: Post = serde_json::from_str(
            r#"{"id":3,"title":"t","content":"c","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(post.is_confirmed());
    }
}
