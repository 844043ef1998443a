//! Shared result envelopes and auth provider data structures.
//!
//! Every admin action answers with the same envelope shape regardless of
//! what went wrong inside it: `{success: true, data?}` or
//! `{success: false, error}`. Validation, transport, not-found, and backend
//! failures all end up here; only the authentication gate answers
//! differently (with a redirect).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Uniform result object returned by the admin actions.
///
/// Exactly one of `data` / `error` is meaningful; absent fields are left
/// out of the serialized body entirely.
#[derive(Debug, Serialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl ActionResult<()> {
    /// Success with no payload, for actions whose only result is the side
    /// effect.
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// Result envelope of the cabin-availability action.
///
/// `count` is always numeric so the UI never receives an absent count; a
/// failed lookup reports zero alongside the error.
#[derive(Debug, Serialize)]
pub struct AvailabilityResult {
    pub success: bool,
    pub count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AvailabilityResult {
    pub fn ok(count: i64) -> Self {
        Self {
            success: true,
            count,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            error: Some(error.into()),
        }
    }
}

/// Extracts a single message from a validation failure.
///
/// Only the first violated rule is surfaced; remaining violations are
/// dropped so the UI always gets one short sentence. This is a deliberate
/// reporting policy, not an aggregation bug.
pub fn first_violation(errors: &ValidationErrors) -> String {
    for (field, violations) in errors.field_errors() {
        if let Some(violation) = violations.first() {
            if let Some(message) = &violation.message {
                return message.clone().into_owned();
            }
            return format!("{field} is invalid");
        }
    }
    "Invalid input".to_string()
}

/// Session envelope returned by the auth provider on sign-in and sign-up.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthSession {
    /// JWT access token for subsequent admin requests
    pub access_token: String,
    /// Token type, "bearer" for JWT tokens
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    /// Unix timestamp when the access token expires
    pub expires_at: i64,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: String,
    /// The session's user profile
    pub user: SessionUser,
}

/// The session's user as reported by the auth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    /// User's unique identifier
    pub id: Uuid,
    /// User's email address
    pub email: String,
    /// Application metadata stored on the account
    #[serde(default)]
    pub user_metadata: SessionMetadata,
}

/// Application metadata stored on the session user.
///
/// `is_admin` is the legacy admin flag still present on accounts created
/// before the `admin_users` table existed; the gate falls back to it when
/// no membership record is found.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Failure reported by the auth provider delegate.
#[derive(Debug, Serialize, Deserialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthError {
    /// Error response directly from the provider, with its status code and
    /// machine-readable error identifier.
    #[error("Authentication error {code}: {msg} ({error_code})")]
    Provider {
        code: u16,
        error_code: String,
        msg: String,
    },
    /// Network or HTTP client failure before a response arrived.
    #[error("Request failed: {0}")]
    Request(String),
    /// The provider answered with an unexpected body.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Reference is required"))]
        reference: String,
    }

    #[test]
    fn first_violation_surfaces_single_message() {
        let err = Probe {
            reference: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(first_violation(&err), "Reference is required");
    }

    #[test]
    fn failed_result_skips_absent_data() {
        let value = serde_json::to_value(ActionResult::<()>::fail("nope")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn empty_success_serializes_to_bare_flag() {
        let value = serde_json::to_value(ActionResult::ok_empty()).unwrap();
        assert_eq!(value, json!({"success": true}));
    }

    #[test]
    fn availability_failure_keeps_numeric_count() {
        let value = serde_json::to_value(AvailabilityResult::fail("backend down")).unwrap();
        assert_eq!(value["count"], json!(0));
        assert_eq!(value["success"], json!(false));
    }
}
