//! Authentication middleware for access token validation
//!
//! Tokens are issued by the auth service and verified here with the shared
//! HS256 secret; no network round trip is needed to gate a request.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{
    error::ApiError,
    guard::{GuardState, Principal},
    state::AppState,
};

/// Claims of a token issued by the auth service
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Token type enum, wire-compatible with the auth service
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

/// Verifies bearer access tokens against the shared secret
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from a shared secret
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        TokenVerifier {
            decoding_key,
            validation,
        }
    }

    /// Create a verifier from the `JWT_SECRET` environment variable
    pub fn from_env() -> Result<Self, String> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable not set".to_string())?;
        Ok(Self::new(&secret))
    }

    /// Resolve a bearer token to a principal
    ///
    /// Returns `None` for anything that does not prove a live session: a
    /// malformed or tampered token, an expired one, or a refresh token used
    /// in place of an access token.
    pub fn resolve(&self, token: &str) -> Option<Principal> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).ok()?;

        if token_data.claims.token_type != TokenType::Access {
            return None;
        }

        Some(Principal {
            id: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}

/// Authentication middleware driving the route guard
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    let guard = GuardState::Unknown.resolve(token.and_then(|t| state.verifier.resolve(t)));

    match guard.principal() {
        Some(principal) => {
            req.extensions_mut().insert(principal.clone());
            Ok(next.run(req).await)
        }
        None => {
            error!("Rejected request without a valid session");
            Err(ApiError::Unauthenticated)
        }
    }
}
