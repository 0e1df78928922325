use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use crate::{
    api_error::ApiError,
    api_json::ApiJson,
    app_state::SharedState,
    authentication::auth,
    login_request::LoginRequest,
    signup_request::SignupRequest,
    token_response::TokenResponse,
    user::User,
    user_get_response::UserGetResponse,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthenticationController {}

impl AuthenticationController {
    pub async fn signup(
        State(state): State<SharedState>,
        ApiJson(payload): ApiJson<SignupRequest>,
    ) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
        payload.validate().map_err(ApiError::Validation)?;

        let password_hash = auth::hash_password(&payload.password)?;
        let user = User::new(payload, password_hash);
        state.data_context.create_user(&user)?;

        let token = auth::create_token(&user, &state.settings)?;
        info!(user_id = %user.id, username = %user.username, "user signed up");
        Ok((StatusCode::CREATED, Json(TokenResponse::bearer(token, user.to_get_dto()))))
    }

    pub async fn login(
        State(state): State<SharedState>,
        ApiJson(payload): ApiJson<LoginRequest>,
    ) -> Result<Json<TokenResponse>, ApiError> {
        let user = state
            .data_context
            .get_user_by_username(&payload.username)?
            .filter(|user| auth::verify_password(&payload.password, &user.password_hash))
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("User is inactive".to_string()));
        }

        let token = auth::create_token(&user, &state.settings)?;
        info!(user_id = %user.id, username = %user.username, "user logged in");
        Ok(Json(TokenResponse::bearer(token, user.to_get_dto())))
    }

    pub async fn me(Extension(user): Extension<User>) -> Json<UserGetResponse> {
        Json(user.to_get_dto())
    }
}
