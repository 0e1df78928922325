use std::sync::Arc;
use axum::{Router, middleware, routing::post};
use crate::{
    ai_controller::AiController,
    app_state::AppState,
    authentication::auth::auth_middleware,
};

pub const ROUTER_PATH: &str = "/v1/tasks/:id";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(format!("{}/ai-breakdown", ROUTER_PATH).as_str(), post(AiController::breakdown))
        .route(format!("{}/estimate", ROUTER_PATH).as_str(), post(AiController::estimate))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
