//! Chat history models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed chat turn, append-only from the application's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Request to append a chat turn
#[derive(Debug, Clone, Deserialize)]
pub struct AppendChatRequest {
    pub question: String,
    pub answer: String,
}

/// Query parameters for chat history listing
#[derive(Debug, Clone, Deserialize)]
pub struct ChatQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of chats per page
    pub limit: Option<u32>,
}

/// Response for chat history listing with offset pagination
#[derive(Debug, Clone, Serialize)]
pub struct ChatListResponse {
    pub items: Vec<ChatRecord>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

/// Request for a chatbot turn
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurnRequest {
    pub message: String,
}

/// Response for a chatbot turn
///
/// `saved` reports whether the turn reached the chat history; a failed save
/// does not withhold the answer.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurnResponse {
    pub answer: String,
    pub saved: bool,
}
