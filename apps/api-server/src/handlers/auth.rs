//! Guest authentication handler.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use uuid::Uuid;

use inkwell_core::domain::{NewUser, User, guest_email};
use inkwell_core::error::RepoError;
use inkwell_shared::dto::{GuestUserResponse, TokenResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the client's persistent device identifier.
pub const DEVICE_ID_HEADER: &str = "X-Device-Id";

/// POST /api/auth/token
///
/// Maps the caller's device to a guest account, creating it on first sight,
/// and issues a fresh bearer token for it.
pub async fn issue_token(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let device_id = device_identifier(&req);
    let user = find_or_create_guest(&state, &device_id).await?;

    let token = state
        .tokens
        .generate_token(user.id, &user.name)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "Issued guest token");

    Ok(HttpResponse::Ok().json(TokenResponse {
        token,
        user: GuestUserResponse {
            id: user.id,
            name: user.name,
        },
    }))
}

/// The `X-Device-Id` header, or `{ip}_{user agent}` when it is absent.
fn device_identifier(req: &HttpRequest) -> String {
    let supplied = req
        .headers()
        .get(DEVICE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(device_id) = supplied {
        return device_id.to_string();
    }

    let info = req.connection_info();
    let ip = info.realip_remote_addr().unwrap_or("unknown");
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    format!("{ip}_{user_agent}")
}

async fn find_or_create_guest(state: &AppState, device_id: &str) -> AppResult<User> {
    let email = guest_email(device_id);

    if let Some(user) = state.users.find_by_email(&email).await? {
        return Ok(user);
    }

    let password_hash = state
        .passwords
        .hash(&Uuid::new_v4().to_string())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    match state.users.create(NewUser::guest(device_id, password_hash)).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "Created guest user");
            Ok(user)
        }
        // A concurrent request for the same device won the insert.
        Err(RepoError::Constraint(_)) => state
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Internal("Guest user vanished after conflict".to_string())),
        Err(e) => Err(e.into()),
    }
}
