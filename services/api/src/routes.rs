//! API service routes

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    guard::Principal,
    middleware::auth_middleware,
    models::{
        chat::{
            AppendChatRequest, ChatListResponse, ChatQuery, ChatTurnRequest, ChatTurnResponse,
        },
        profile::{AvatarQuery, AvatarResponse, Profile, SaveProfileRequest},
    },
    planner::{self, RoutePlanRequest},
    repositories::chat::total_pages,
    state::AppState,
    translator::{self, TranslateRequest, TranslateResponse},
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/chat", post(append_chat))
        .route("/chats", get(list_chats))
        .route("/profile", get(fetch_profile))
        .route("/profile", put(save_profile))
        .route("/profile/avatar", post(upload_avatar))
        .route("/chatbot", post(chatbot_turn))
        .route("/routes/plan", post(plan_routes))
        .route("/translate", post(translate_text))
        .route("/translate/languages", get(list_languages))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Append one chat turn to the caller's history
pub async fn append_chat(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<AppendChatRequest>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .chat_repository
        .append(principal.id, &payload.question, &payload.answer)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save chat: {}", e);
            ApiError::Database(e)
        })?;

    Ok((axum::http::StatusCode::CREATED, Json(record)))
}

/// List the caller's chat history, newest first, with offset pagination
pub async fn list_chats(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ChatQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let (items, total) = state
        .chat_repository
        .list(principal.id, page, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch chat history: {}", e);
            ApiError::Database(e)
        })?;

    let response = ChatListResponse {
        items,
        page,
        limit,
        total,
        total_pages: total_pages(total, limit),
    };

    Ok(Json(response))
}

/// Fetch the caller's profile
///
/// A missing row is not an error; the caller gets an empty profile
/// pre-populated with the session's email.
pub async fn fetch_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .profile_repository
        .fetch(principal.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch profile: {}", e);
            ApiError::Database(e)
        })?
        .unwrap_or_else(|| Profile::default_for(&principal));

    Ok(Json(profile))
}

/// Save the caller's profile, replacing every mutable field
pub async fn save_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<SaveProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let profile = Profile {
        id: principal.id,
        full_name: payload.full_name,
        username: payload.username,
        gender: payload.gender,
        email: payload.email,
        phone: payload.phone,
        avatar_url: payload.avatar_url,
    };

    let saved = state.profile_repository.save(&profile).await.map_err(|e| {
        tracing::error!("Failed to save profile: {}", e);
        ApiError::Database(e)
    })?;

    Ok(Json(saved))
}

/// Upload an avatar image and return its public URL
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<AvatarQuery>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let extension = query
        .ext
        .ok_or_else(|| ApiError::Validation("File extension is required".to_string()))?;

    if extension.is_empty()
        || extension.len() > 8
        || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ApiError::Validation("Invalid file extension".to_string()));
    }

    if body.is_empty() {
        return Err(ApiError::Validation("Avatar file is empty".to_string()));
    }

    let avatar_url = state
        .avatar_store
        .upload(principal.id, body.to_vec(), &extension)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upload avatar: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(AvatarResponse { avatar_url }))
}

/// One chatbot turn: canned reply after the configured delay, then the
/// chat-save side effect
///
/// A failed save never withholds the answer; it is reported via `saved`
/// and logged.
pub async fn chatbot_turn(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<ChatTurnRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::Validation("Message is required".to_string()));
    }

    state.latencies.chatbot.simulate().await;

    let answer = state.responder.respond(&payload.message);

    let saved = match state
        .chat_repository
        .append(principal.id, &payload.message, &answer)
        .await
    {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Failed to save chat history: {}", e);
            false
        }
    };

    Ok(Json(ChatTurnResponse { answer, saved }))
}

/// Canned fastest/safest route plan for an origin/destination pair
pub async fn plan_routes(
    State(state): State<AppState>,
    Extension(_principal): Extension<Principal>,
    Json(payload): Json<RoutePlanRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.origin.trim().is_empty() || payload.destination.trim().is_empty() {
        return Err(ApiError::Validation(
            "Origin and destination are required".to_string(),
        ));
    }

    state.latencies.planner.simulate().await;

    Ok(Json(planner::canned_plan()))
}

/// Canned translation into one of the supported languages
pub async fn translate_text(
    State(state): State<AppState>,
    Extension(_principal): Extension<Principal>,
    Json(payload): Json<TranslateRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::Validation("Text is required".to_string()));
    }

    let translated = translator::translate(&payload.text, &payload.language)
        .ok_or_else(|| ApiError::Validation("Unsupported language".to_string()))?;

    state.latencies.translator.simulate().await;

    Ok(Json(TranslateResponse {
        language: payload.language,
        translated_text: translated.to_string(),
    }))
}

/// All languages the translator supports
pub async fn list_languages() -> impl IntoResponse {
    Json(translator::supported_languages())
}
