//! Repositories for database operations
//!
//! Every statement in these repositories is scoped to the principal issuing
//! the call; no cross-principal read or write is expressible through them.

pub mod chat;
pub mod profile;

pub use chat::ChatRepository;
pub use profile::ProfileRepository;
