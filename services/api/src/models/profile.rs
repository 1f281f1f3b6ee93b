//! Profile models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guard::Principal;

/// Profile row, one per user, keyed by the principal id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

impl Profile {
    /// The empty profile shown before a first save, pre-populated with the
    /// session's email
    pub fn default_for(principal: &Principal) -> Self {
        Profile {
            id: principal.id,
            full_name: None,
            username: None,
            gender: None,
            email: Some(principal.email.clone()),
            phone: None,
            avatar_url: None,
        }
    }
}

/// Request to save a profile; a full replacement of every mutable field
#[derive(Debug, Clone, Deserialize)]
pub struct SaveProfileRequest {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

/// Query parameters for an avatar upload
#[derive(Debug, Clone, Deserialize)]
pub struct AvatarQuery {
    /// File extension of the uploaded image (e.g., "png")
    pub ext: Option<String>,
}

/// Response for an avatar upload
#[derive(Debug, Clone, Serialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_carries_session_email_only() {
        let principal = Principal {
            id: Uuid::new_v4(),
            email: "traveler@example.com".to_string(),
        };

        let profile = Profile::default_for(&principal);

        assert_eq!(profile.id, principal.id);
        assert_eq!(profile.email.as_deref(), Some("traveler@example.com"));
        assert_eq!(profile.full_name, None);
        assert_eq!(profile.username, None);
        assert_eq!(profile.gender, None);
        assert_eq!(profile.phone, None);
        assert_eq!(profile.avatar_url, None);
    }
}
