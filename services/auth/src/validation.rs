//! Input validation utilities
//!
//! All checks here run before any database or Redis call; a violation is a
//! local validation error and never reaches a remote collaborator.

use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password policy
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a new password and its confirmation
pub fn validate_new_password(new_password: &str, confirm_password: &str) -> Result<(), String> {
    if new_password != confirm_password {
        return Err("Passwords do not match".to_string());
    }

    validate_password(new_password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_email() {
        assert!(validate_email("traveler@example.com").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn rejects_short_password_even_when_confirmed() {
        let result = validate_new_password("abc", "abc");
        assert_eq!(
            result,
            Err("Password must be at least 6 characters long".to_string())
        );
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        let result = validate_new_password("abcdef", "abcxyz");
        assert_eq!(result, Err("Passwords do not match".to_string()));
    }

    #[test]
    fn accepts_matching_password_of_minimum_length() {
        assert!(validate_new_password("abcdef", "abcdef").is_ok());
    }
}
