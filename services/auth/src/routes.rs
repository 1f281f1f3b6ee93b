//! Identity service routes

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    jwt::TokenType,
    middleware::{CurrentUser, auth_middleware},
    models::{Credentials, NewUser},
    validation,
};

/// Response for token issuance (register, login)
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request carrying a refresh token (refresh, logout)
#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Request for a password change
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// Response describing the current user
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

/// Create the router for the identity service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/password", post(change_password))
        .route("/auth/account", delete(delete_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh_token))
        .route("/auth/logout", post(logout))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Register a new user and sign them in
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Registration attempt for: {}", payload.email);

    validation::validate_email(&payload.email).map_err(AuthError::Validation)?;
    validation::validate_password(&payload.password).map_err(AuthError::Validation)?;

    let existing = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(AuthError::Validation("Email already registered".to_string()));
    }

    let user = state
        .user_repository
        .create(&payload)
        .await
        .map_err(map_create_user_error)?;

    let response = issue_tokens(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Login attempt for: {}", payload.email);

    if !state.rate_limiter.is_allowed(&payload.email).await {
        return Err(AuthError::TooManyRequests);
    }

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or(AuthError::Unauthorized)?;

    let password_ok = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            AuthError::InternalServerError
        })?;

    if !password_ok {
        return Err(AuthError::Unauthorized);
    }

    let response = issue_tokens(&state, &user).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Refresh token endpoint, rotates the refresh token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Token refresh request");

    let claims = state
        .jwt_service
        .validate_token(&payload.refresh_token)
        .map_err(|_| AuthError::Unauthorized)?;

    if claims.token_type != TokenType::Refresh {
        return Err(AuthError::Unauthorized);
    }

    // The stored session must still hold exactly this token; logout and
    // account deletion invalidate it immediately
    let session_ok = state
        .sessions
        .is_valid(claims.sub, &payload.refresh_token)
        .await
        .map_err(|e| {
            error!("Failed to check session: {}", e);
            AuthError::InternalServerError
        })?;

    if !session_ok {
        return Err(AuthError::Unauthorized);
    }

    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or(AuthError::Unauthorized)?;

    let response = issue_tokens(&state, &user).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Logout endpoint, destroys the stored session
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Logout request");

    let claims = state
        .jwt_service
        .validate_token(&payload.refresh_token)
        .map_err(|_| AuthError::Unauthorized)?;

    if claims.token_type != TokenType::Refresh {
        return Err(AuthError::Unauthorized);
    }

    state.sessions.delete(claims.sub).await.map_err(|e| {
        error!("Failed to delete session: {}", e);
        AuthError::InternalServerError
    })?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({"message": "Logged out successfully"})),
    ))
}

/// Current user endpoint
pub async fn me(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    Json(UserResponse {
        id: user.id,
        email: user.email,
    })
}

/// Change password endpoint
///
/// Mismatch and length violations are rejected here, before any database
/// call is attempted.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validation::validate_new_password(&payload.new_password, &payload.confirm_password)
        .map_err(AuthError::Validation)?;

    state
        .user_repository
        .update_password(user.id, &payload.new_password)
        .await
        .map_err(|e| {
            error!("Failed to update password: {}", e);
            AuthError::InternalServerError
        })?;

    Ok(Json(serde_json::json!({
        "message": "Password updated successfully"
    })))
}

/// Delete account endpoint
///
/// Removes the profile row and identity row in one transaction, then
/// invalidates the session.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AuthError> {
    state
        .user_repository
        .delete_account(user.id)
        .await
        .map_err(|e| {
            error!("Failed to delete account: {}", e);
            AuthError::InternalServerError
        })?;

    state.sessions.delete(user.id).await.map_err(|e| {
        error!("Failed to delete session: {}", e);
        AuthError::InternalServerError
    })?;

    Ok(Json(serde_json::json!({
        "message": "Account deleted successfully"
    })))
}

/// Map a user-creation failure to a response error
///
/// The duplicate-email pre-check races against concurrent registrations;
/// the `users.email` unique constraint is authoritative, so its violation
/// gets the same validation response as the pre-check.
pub(crate) fn map_create_user_error(e: anyhow::Error) -> AuthError {
    if let Some(sqlx::Error::Database(db)) = e.downcast_ref::<sqlx::Error>() {
        if db.is_unique_violation() {
            return AuthError::Validation("Email already registered".to_string());
        }
    }

    error!("Failed to create user: {}", e);
    AuthError::InternalServerError
}

async fn issue_tokens(state: &AppState, user: &crate::models::User) -> Result<TokenResponse, AuthError> {
    let access_token = state.jwt_service.generate_access_token(user).map_err(|e| {
        error!("Failed to generate access token: {}", e);
        AuthError::InternalServerError
    })?;

    let refresh_token = state
        .jwt_service
        .generate_refresh_token(user)
        .map_err(|e| {
            error!("Failed to generate refresh token: {}", e);
            AuthError::InternalServerError
        })?;

    state
        .sessions
        .create(user.id, &refresh_token)
        .await
        .map_err(|e| {
            error!("Failed to store session: {}", e);
            AuthError::InternalServerError
        })?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    })
}

/// Custom error type for authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many login attempts, try again later".to_string(),
            ),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_failure_without_database_cause_is_internal() {
        let err = map_create_user_error(anyhow::anyhow!("connection reset"));
        assert!(matches!(err, AuthError::InternalServerError));
    }
}
