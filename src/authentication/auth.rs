use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{api_error::ApiError, app_state::SharedState, settings::Settings, user::User};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

pub fn create_token(user: &User, settings: &Settings) -> Result<String, AuthError> {
    let now = Utc::now();
    let expiry = now + Duration::minutes(settings.jwt_expiration_in_minutes as i64);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: expiry.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(AuthError::Encode)
}

pub fn verify_token(token: &str, settings: &Settings) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(AuthError::InvalidToken)?;
    Ok(token_data.claims)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Bearer header first, then the `token` query parameter (browsers cannot set
/// headers on websocket upgrades).
fn request_token(request: &Request<Body>) -> Option<String> {
    let from_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());

    from_header.filter(|token| !token.is_empty()).or_else(|| {
        Query::<TokenQuery>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(query)| query.token)
            .filter(|token| !token.is_empty())
    })
}

/// Resolve the caller and hand the `User` to handlers as a request extension.
pub async fn auth_middleware(
    State(state): State<SharedState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request_token(&request).ok_or(AuthError::MissingToken)?;
    let claims = verify_token(&token, &state.settings)?;

    let user = state
        .data_context
        .get_user(claims.sub)?
        .filter(|user| user.is_active)
        .ok_or_else(|| ApiError::Unauthorized("User not found or inactive".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup_request::SignupRequest;

    fn user() -> User {
        User::new(
            SignupRequest {
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "irrelevant".to_string(),
                full_name: None,
            },
            String::new(),
        )
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not a hash"));
    }

    #[test]
    fn token_carries_user_identity() {
        let settings = Settings::default();
        let user = user();
        let token = create_token(&user, &settings).unwrap();
        let claims = verify_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "ada");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let settings = Settings::default();
        let other = Settings {
            jwt_secret: "another-secret".to_string(),
            ..Settings::default()
        };
        let token = create_token(&user(), &other).unwrap();
        assert!(matches!(verify_token(&token, &settings), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn token_taken_from_header_or_query() {
        let request = Request::builder()
            .uri("/v1/tasks")
            .header(header::AUTHORIZATION, "Bearer abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_token(&request).as_deref(), Some("abc"));

        let request = Request::builder()
            .uri("/v1/realtime?token=xyz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_token(&request).as_deref(), Some("xyz"));

        let request = Request::builder().uri("/v1/tasks").body(Body::empty()).unwrap();
        assert_eq!(request_token(&request), None);
    }
}
