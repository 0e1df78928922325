use std::sync::Arc;
use axum::{Router, middleware, routing::get};
use crate::{
    app_state::AppState,
    authentication::auth::auth_middleware,
    insight_controller::InsightController,
};

pub const ROUTER_PATH: &str = "/v1/insights";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(format!("{}/behavior", ROUTER_PATH).as_str(), get(InsightController::behavior))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
