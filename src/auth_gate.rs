//! Authentication gate for the admin pages.
//!
//! # Overview
//! This module provides [`AdminGate`], an Actix Web extractor mounted on
//! every protected admin handler. It resolves the request to an
//! [`AdminContext`] or answers with a redirect to the sign-in page, so a
//! protected handler never runs for a request the gate rejects. Sign-in and
//! sign-up routes do not mount the gate at all; that is the route-level
//! allowlist.
//!
//! The gate mode is fixed when [`AppState`] is built and checked in strict
//! order, first match wins:
//!
//! 1. [`AuthMode::Bypass`] allows every request with a synthetic context.
//! 2. [`AuthMode::Mock`] trusts a truthy [`MOCK_ADMIN_COOKIE`] cookie.
//! 3. [`AuthMode::Real`] resolves the bearer token with the auth provider,
//!    then confirms admin membership in `admin_users`, falling back to the
//!    legacy `is_admin` metadata flag on the session user.
//!
//! Bypass and mock are development-time weakenings of the gate and must not
//! be reachable in a production deployment.
//!
//! ## Test Mode
//! In integration tests (debug builds with the `TEST` environment variable
//! set), the headers `X-Test-Admin-Id`, `X-Test-Email` and `X-Test-Role`
//! inject a session without calling the auth provider:
//!
//! ```
//! use actix_web::test::TestRequest;
//!
//! let req = TestRequest::get()
//!     .uri("/api/admin/seats")
//!     .insert_header(("X-Test-Admin-Id", "00000000-0000-0000-0000-000000000001"))
//!     .insert_header(("X-Test-Email", "admin@example.com"))
//!     .insert_header(("X-Test-Role", "admin"))
//!     .to_request();
//! ```
//!
//! # Failure behavior
//! The gate never answers with an action envelope; every rejection is a 302
//! redirect, either to sign-in with the original path in the `redirect`
//! query parameter, or with `error=unauthorized` for a confirmed non-admin
//! session. It performs no writes and at most two backend reads per request.

use std::{ops::Deref, str::FromStr};

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError,
    http::{StatusCode, header},
    web,
};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::{
    AppState,
    config::{AuthMode, MOCK_ADMIN_COOKIE, truthy},
    models::AdminRecord,
    services::AuthService,
};

/// Path of the admin sign-in page the gate redirects to.
pub const SIGN_IN_PATH: &str = "/admin/sign-in";

/// The resolved admin identity injected into protected handlers.
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// Admin's unique identifier
    pub id: Uuid,
    /// Admin's email address
    pub email: String,
    /// Admin's display name, when the session carries one
    pub name: Option<String>,
}

impl AdminContext {
    fn synthetic(email: &str) -> Self {
        Self {
            id: Uuid::nil(),
            email: email.to_string(),
            name: None,
        }
    }
}

/// Actix Web extractor enforcing the authentication gate.
#[derive(Debug, Clone)]
pub struct AdminGate(pub AdminContext);

impl Deref for AdminGate {
    type Target = AdminContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Redirect answer produced when the gate rejects a request.
#[derive(Debug, thiserror::Error)]
#[error("redirecting to {location}")]
pub struct GateRedirect {
    location: String,
}

impl GateRedirect {
    /// Sign-in redirect carrying the original path so the page can return
    /// the admin after authentication.
    fn to_sign_in(return_path: &str) -> Self {
        let encoded: String = url::form_urlencoded::byte_serialize(return_path.as_bytes()).collect();
        Self {
            location: format!("{SIGN_IN_PATH}?redirect={encoded}"),
        }
    }

    /// Sign-in redirect for a session that resolved but is not an admin.
    fn unauthorized() -> Self {
        Self {
            location: format!("{SIGN_IN_PATH}?error=unauthorized"),
        }
    }
}

impl ResponseError for GateRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location.clone()))
            .finish()
    }
}

impl FromRequest for AdminGate {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        // TEST SHORT-CIRCUIT: inject a session from headers in test runs
        if std::env::var("TEST").is_ok() && cfg!(debug_assertions) {
            let id = req
                .headers()
                .get("X-Test-Admin-Id")
                .and_then(|v| v.to_str().ok());
            let email = req
                .headers()
                .get("X-Test-Email")
                .and_then(|v| v.to_str().ok());
            if let (Some(id), Some(email)) = (id, email) {
                let role = req
                    .headers()
                    .get("X-Test-Role")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("admin");
                tracing::debug!(
                    test_admin_id = %id,
                    test_email = %email,
                    test_role = %role,
                    "Using test authentication headers"
                );

                if role != "admin" {
                    return Box::pin(async move { Err(GateRedirect::unauthorized().into()) });
                }

                let admin_id = match Uuid::from_str(id) {
                    Ok(u) => u,
                    Err(e) => {
                        return Box::pin(async move {
                            Err(actix_web::error::ErrorBadRequest(format!(
                                "Invalid UUID: {e}"
                            )))
                        });
                    }
                };

                let ctx = AdminContext {
                    id: admin_id,
                    email: email.to_string(),
                    name: Some("Test Admin".to_string()),
                };
                return Box::pin(async move { Ok(AdminGate(ctx)) });
            }
        }

        let req = req.clone();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("AppState missing")
            })?;
            let return_path = req.path().to_string();

            match state.auth_mode {
                AuthMode::Bypass => {
                    tracing::debug!(path = %return_path, "Auth bypass active, admitting request");
                    Ok(AdminGate(AdminContext::synthetic("bypass@aerodesk.local")))
                }
                AuthMode::Mock => {
                    let allowed = req
                        .cookie(MOCK_ADMIN_COOKIE)
                        .map(|c| truthy(c.value()))
                        .unwrap_or(false);
                    if allowed {
                        tracing::debug!(path = %return_path, "Mock admin cookie accepted");
                        Ok(AdminGate(AdminContext::synthetic("mock@aerodesk.local")))
                    } else {
                        tracing::warn!(path = %return_path, "Mock admin cookie missing or falsy");
                        Err(GateRedirect::to_sign_in(&return_path).into())
                    }
                }
                AuthMode::Real => {
                    let Some(token) = bearer_token(&req) else {
                        tracing::warn!(path = %return_path, "No session token on protected admin request");
                        return Err(GateRedirect::to_sign_in(&return_path).into());
                    };

                    let user = match AuthService::session_user(&state, &token).await {
                        Ok(Some(user)) => user,
                        Ok(None) => {
                            tracing::warn!(path = %return_path, "Auth provider rejected session token");
                            return Err(GateRedirect::to_sign_in(&return_path).into());
                        }
                        Err(e) => {
                            tracing::error!(path = %return_path, error = ?e, "Failed to resolve session");
                            return Err(GateRedirect::to_sign_in(&return_path).into());
                        }
                    };

                    // Membership record first, then the legacy metadata flag
                    // still present on accounts created before admin_users.
                    let membership = sqlx::query_as::<_, AdminRecord>(
                        "SELECT user_id, role FROM admin_users WHERE user_id = $1",
                    )
                    .bind(user.id)
                    .fetch_optional(state.db.as_ref())
                    .await;

                    let is_admin = match membership {
                        Ok(Some(record)) => {
                            tracing::debug!(
                                admin_id = %record.user_id,
                                role = %record.role,
                                "Admin membership confirmed"
                            );
                            true
                        }
                        Ok(None) => user.user_metadata.is_admin.unwrap_or(false),
                        Err(e) => {
                            tracing::error!(
                                user_id = %user.id,
                                error = ?e,
                                "Admin membership lookup failed, falling back to legacy flag"
                            );
                            user.user_metadata.is_admin.unwrap_or(false)
                        }
                    };

                    if !is_admin {
                        tracing::warn!(
                            user_id = %user.id,
                            email = %user.email,
                            "Authenticated user is not an admin"
                        );
                        return Err(GateRedirect::unauthorized().into());
                    }

                    tracing::info!(
                        admin_id = %user.id,
                        email = %user.email,
                        "Admin session resolved"
                    );
                    Ok(AdminGate(AdminContext {
                        id: user.id,
                        email: user.email,
                        name: user.user_metadata.name,
                    }))
                }
            }
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_redirect_encodes_return_path() {
        let redirect = GateRedirect::to_sign_in("/api/admin/seats");
        assert_eq!(
            redirect.location,
            "/admin/sign-in?redirect=%2Fapi%2Fadmin%2Fseats"
        );
    }

    #[test]
    fn unauthorized_redirect_carries_marker() {
        assert_eq!(
            GateRedirect::unauthorized().location,
            "/admin/sign-in?error=unauthorized"
        );
    }
}
