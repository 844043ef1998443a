//! Startup configuration for the admin authentication gate.
//!
//! The gate's mode is resolved exactly once, when [`crate::AppState`] is
//! built, and carried as a value from then on. Request handling never reads
//! the process environment for policy decisions.

use std::env;

/// Name of the cookie carrying the mock-admin flag when [`AuthMode::Mock`]
/// is active.
pub const MOCK_ADMIN_COOKIE: &str = "mock_admin_session";

/// Policy selector for the admin authentication gate.
///
/// Checked in declaration order, first match wins: `BYPASS_ADMIN_AUTH`
/// beats `MOCK_ADMIN_AUTH` beats the real session check. Bypass and mock
/// exist for development only and must never be set in a production
/// deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Allow every request without any session check.
    Bypass,
    /// Trust the mock-admin cookie instead of the session provider.
    Mock,
    /// Resolve the session with the auth provider and check admin membership.
    Real,
}

impl AuthMode {
    /// Resolves the gate mode from `BYPASS_ADMIN_AUTH` / `MOCK_ADMIN_AUTH`.
    pub fn from_env() -> Self {
        if flag_set("BYPASS_ADMIN_AUTH") {
            AuthMode::Bypass
        } else if flag_set("MOCK_ADMIN_AUTH") {
            AuthMode::Mock
        } else {
            AuthMode::Real
        }
    }
}

fn flag_set(name: &str) -> bool {
    env::var(name).map(|v| truthy(&v)).unwrap_or(false)
}

/// Truthiness shared by the environment flags and the mock-admin cookie.
pub fn truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_accepts_common_spellings() {
        assert!(truthy("1"));
        assert!(truthy("true"));
        assert!(truthy(" yes "));
        assert!(!truthy("0"));
        assert!(!truthy("false"));
        assert!(!truthy(""));
    }

    #[test]
    fn bypass_flag_wins_over_mock() {
        unsafe {
            env::set_var("BYPASS_ADMIN_AUTH", "1");
            env::set_var("MOCK_ADMIN_AUTH", "1");
        }
        assert_eq!(AuthMode::from_env(), AuthMode::Bypass);
        unsafe {
            env::remove_var("BYPASS_ADMIN_AUTH");
            env::remove_var("MOCK_ADMIN_AUTH");
        }
        assert_eq!(AuthMode::from_env(), AuthMode::Real);
    }
}
