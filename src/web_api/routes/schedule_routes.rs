use std::sync::Arc;
use axum::{Router, middleware, routing::post};
use crate::{
    app_state::AppState,
    authentication::auth::auth_middleware,
    schedule_controller::ScheduleController,
};

pub const ROUTER_PATH: &str = "/v1/schedule";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(format!("{}/optimize", ROUTER_PATH).as_str(), post(ScheduleController::optimize))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
