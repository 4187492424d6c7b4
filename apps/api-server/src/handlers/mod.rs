//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;


use actix_web::{HttpResponse, error::InternalError, web};

use inkwell_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/auth/token", web::post().to(auth::issue_token))
            // Bearer-token routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::store))
                    .route("/{id}", web::delete().to(posts::destroy)),
            ),
    );
}

/// Malformed JSON bodies get a problem-details response instead of plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}
