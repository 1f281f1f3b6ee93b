//! API models for request and response payloads

pub mod chat;
pub mod profile;
