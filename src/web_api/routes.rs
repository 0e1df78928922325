pub mod authentication_routes;
pub mod task_routes;
pub mod ai_routes;
pub mod insight_routes;
pub mod schedule_routes;
pub mod realtime_routes;
pub mod health_routes;

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{api_error::ApiError, app_state::SharedState};

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(authentication_routes::get_router(app_state.clone()))
        .merge(task_routes::get_router(app_state.clone()))
        .merge(ai_routes::get_router(app_state.clone()))
        .merge(insight_routes::get_router(app_state.clone()))
        .merge(schedule_routes::get_router(app_state.clone()))
        .merge(realtime_routes::get_router(app_state))
        .merge(health_routes::get_router())
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%reason, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal server error" })),
    )
        .into_response()
}
