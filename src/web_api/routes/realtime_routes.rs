use std::sync::Arc;
use axum::{Router, middleware, routing::get};
use crate::{
    app_state::AppState,
    authentication::auth::auth_middleware,
    realtime_controller::RealtimeController,
};

pub const ROUTER_PATH: &str = "/v1/realtime";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(RealtimeController::connect))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
