use std::sync::Arc;
use axum::{Router, middleware, routing::{get, post}};
use crate::{
    app_state::AppState,
    authentication::auth::auth_middleware,
    authentication_controller::AuthenticationController,
};

pub const ROUTER_PATH: &str = "/api/auth";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    let me = Router::new()
        .route(format!("{}/me", ROUTER_PATH).as_str(), get(AuthenticationController::me))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    Router::new()
        .route(format!("{}/signup", ROUTER_PATH).as_str(), post(AuthenticationController::signup))
        .route(format!("{}/login", ROUTER_PATH).as_str(), post(AuthenticationController::login))
        .merge(me)
        .with_state(app_state)
}
