//! User-facing error messages
//!
//! Screens render these directly; the backend's own message wins when it
//! sent one.

use edupredict_http::ClientError;

pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile. Please try again.";
pub const PASSWORD_CHANGE_FAILED: &str = "Failed to change password. Please try again.";
pub const CONNECTION_FAILED: &str =
    "Unable to reach the server. Please check your connection and try again.";

/// Convert a client failure into the message a screen should show
pub fn user_message(error: &ClientError, fallback: &str) -> String {
    if error.is_network() {
        return CONNECTION_FAILED.to_owned();
    }
    match error.message() {
        Some(message) if !message.trim().is_empty() => message.to_owned(),
        _ => fallback.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins_over_fallback() {
        let error = ClientError::BadRequest("Invalid credentials".into());
        assert_eq!(user_message(&error, LOGIN_FAILED), "Invalid credentials");
    }

    #[test]
    fn blank_backend_message_falls_back() {
        let error = ClientError::BadRequest("  ".into());
        assert_eq!(user_message(&error, LOGIN_FAILED), LOGIN_FAILED);
    }
}
