//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    latency::MockLatencies,
    middleware::TokenVerifier,
    repositories::{ChatRepository, ProfileRepository},
    responder::ResponseSource,
    storage::AvatarStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub verifier: TokenVerifier,
    pub chat_repository: ChatRepository,
    pub profile_repository: ProfileRepository,
    pub avatar_store: AvatarStore,
    pub responder: Arc<dyn ResponseSource>,
    pub latencies: MockLatencies,
}
