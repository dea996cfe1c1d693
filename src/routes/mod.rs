//! Router composition: `/users` and `/posts` routes under panic recovery
//! and a fixed request timeout.

mod common;
mod entity;

pub use common::{common_routes, common_routes_with_ready};
pub use entity::entity_routes;

use crate::error::{error_response, INTERNAL_MESSAGE};
use crate::state::AppState;
use axum::{error_handling::HandleErrorLayer, http::StatusCode, response::Response, BoxError, Router};
use std::any::Any;
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Applied to every request. Expiry drops the handler future, cancelling any
/// database call still in flight, and answers 504.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(entity_routes("/users", state.users))
        .merge(entity_routes("/posts", state.posts))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(timeout_response))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
}

async fn timeout_response(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::warn!(timeout_secs = REQUEST_TIMEOUT.as_secs(), "request timed out");
        return error_response(StatusCode::GATEWAY_TIMEOUT, "timeout", "request timed out".to_string());
    }
    tracing::error!(error = %err, "unhandled middleware error");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", INTERNAL_MESSAGE.to_string())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", INTERNAL_MESSAGE.to_string())
}
