//! Post handlers. Every route is scoped to the authenticated caller.

use actix_web::{HttpResponse, web};

use inkwell_core::error::{DomainError, RepoError};
use inkwell_shared::dto::{CreatePostForm, CreatePostResponse, MessageResponse, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn index(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_owner(identity.user_id).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts
pub async fn store(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let new_post = body.into_inner().into_new_post()?;

    let post = state.posts.create(identity.user_id, new_post).await?;
    tracing::info!(user_id = identity.user_id, post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(CreatePostResponse {
        message: "Post created successfully".to_string(),
        post: post.into(),
    }))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(identity.user_id, id).await {
        Ok(()) => {}
        Err(RepoError::NotFound) => {
            return Err(DomainError::NotFound {
                entity_type: "Post",
                id,
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id = identity.user_id, post_id = id, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
