pub mod handlers;
pub mod rate_limiter;
pub mod types;

use crate::server::handlers::{
    generate_handler, method_not_allowed_handler, server_status_handler,
};
use crate::server::rate_limiter::is_allowed_origin;
use crate::server::types::AppState;
use crate::utils::constants::{GENERATE_ROUTE, SERVER_REQUEST_BODY_LIMIT};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::request::Parts;
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

pub fn cors_layer(allowed_hosts: Vec<String>) -> CorsLayer {
    let origin = if allowed_hosts.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
            is_allowed_origin(origin.to_str().ok(), &allowed_hosts)
        })
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Routes without the rate limiter, which needs connect info from the listener.
pub fn router(state: Arc<AppState>, allowed_hosts: Vec<String>) -> Router {
    Router::new()
        .route("/", get(server_status_handler))
        .route(
            GENERATE_ROUTE,
            post(generate_handler).fallback(method_not_allowed_handler),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(SERVER_REQUEST_BODY_LIMIT))
        .layer(cors_layer(allowed_hosts))
        .with_state(state)
}
