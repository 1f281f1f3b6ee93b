use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod guard;
mod latency;
mod middleware;
mod models;
mod planner;
mod repositories;
mod responder;
mod routes;
mod state;
mod storage;
mod translator;

use common::database::{DatabaseConfig, init_pool};

use crate::{
    latency::MockLatencies,
    middleware::TokenVerifier,
    repositories::{ChatRepository, ProfileRepository},
    responder::CannedResponses,
    state::AppState,
    storage::AvatarStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Token verifier shares its secret with the auth service
    let verifier = TokenVerifier::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Avatar object store
    let avatar_store = AvatarStore::from_env().await?;

    // Initialize repositories
    let chat_repository = ChatRepository::new(pool.clone());
    let profile_repository = ProfileRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        verifier,
        chat_repository,
        profile_repository,
        avatar_store,
        responder: Arc::new(CannedResponses::travel_companion()),
        latencies: MockLatencies::from_env(),
    };

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    info!("API service listening on 0.0.0.0:3001");

    axum::serve(listener, app).await?;

    Ok(())
}
