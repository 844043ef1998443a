//! Auth provider service for admin sign-in, sign-up, and session
//! resolution.
//!
//! Thin client over the Supabase Auth REST API. Error mapping keeps the
//! user-facing messages short while preserving the provider's error codes
//! for the caller.

use serde::Deserialize;

use crate::{
    AppState,
    data::{AuthError, AuthSession, SessionUser},
};

use super::{HTTP, base_url};

/// Error body shape returned by the auth provider.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Service layer for authentication operations against the hosted provider.
pub struct AuthService;

impl AuthService {
    /// Creates an admin account with the provider.
    ///
    /// The display name is stored in the provider's user metadata; admin
    /// membership itself is granted separately through `admin_users`.
    pub async fn sign_up(
        state: &AppState,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let res = HTTP
            .post(format!("{}/auth/v1/signup", base_url(state)))
            .header("apikey", &state.supabase_anon_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "name": name }
            }))
            .send()
            .await
            .map_err(|e| {
                AuthError::Request(format!("Unable to reach the authentication service: {e}"))
            })?;
        Self::parse_session(res).await
    }

    /// Authenticates with email and password, returning the provider
    /// session on success.
    pub async fn sign_in(
        state: &AppState,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let res = HTTP
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                base_url(state)
            ))
            .header("apikey", &state.supabase_anon_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .map_err(|e| {
                AuthError::Request(format!("Unable to reach the authentication service: {e}"))
            })?;
        Self::parse_session(res).await
    }

    /// Resolves the session user behind an access token.
    ///
    /// `Ok(None)` means the provider rejected the token; transport and
    /// contract failures are reported as errors.
    pub async fn session_user(
        state: &AppState,
        access_token: &str,
    ) -> Result<Option<SessionUser>, AuthError> {
        let res = HTTP
            .get(format!("{}/auth/v1/user", base_url(state)))
            .header("apikey", &state.supabase_anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AuthError::Request(format!("Unable to reach the authentication service: {e}"))
            })?;

        let status = res.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Self::provider_error(status.as_u16(), &body));
        }

        let user = res
            .json::<SessionUser>()
            .await
            .map_err(|e| AuthError::Parse(format!("Unexpected session payload: {e}")))?;
        Ok(Some(user))
    }

    async fn parse_session(res: reqwest::Response) -> Result<AuthSession, AuthError> {
        let status = res.status();
        let body = res.text().await.map_err(|e| {
            AuthError::Request(format!(
                "Received an invalid response from the authentication service: {e}"
            ))
        })?;

        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| AuthError::Parse(format!("Unexpected session payload: {e}")))
        } else {
            Err(Self::provider_error(status.as_u16(), &body))
        }
    }

    fn provider_error(code: u16, body: &str) -> AuthError {
        match serde_json::from_str::<ProviderErrorBody>(body) {
            Ok(e) => AuthError::Provider {
                code,
                error_code: e.error_code.unwrap_or_else(|| "unknown".to_string()),
                msg: e
                    .msg
                    .or(e.message)
                    .unwrap_or_else(|| "Authentication failed".to_string()),
            },
            Err(_) => AuthError::Provider {
                code,
                error_code: "unknown".to_string(),
                msg: "Authentication failed".to_string(),
            },
        }
    }
}
