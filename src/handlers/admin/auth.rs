//! Admin authentication endpoints: sign-up and sign-in via the hosted auth
//! provider.
//!
//! These endpoints validate input and proxy requests to the provider's REST
//! API. They are the routes the authentication gate allowlists; everything
//! else under `/api/admin` requires a resolved admin session.

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use validator::Validate;

use crate::{
    AppState,
    data::{AuthError, first_violation},
    services::AuthService,
};

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 64, message = "Name must be between 2 and 64 characters"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "Password must be between 8 and 64 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "Password must be between 8 and 64 characters"))]
    pub password: String,
}

/// Creates an admin account with the auth provider.
///
/// # HTTP Method
/// `POST /api/admin/sign-up`
///
/// # Request Body (JSON)
/// ```json
/// {
///   "name": "Jane Admin",
///   "email": "admin@example.com",
///   "password": "SecureAdminPass123"
/// }
/// ```
///
/// # Error Responses
/// - `400 Bad Request`: validation failure (first violated rule only)
/// - provider status: the provider rejected the request (duplicate email,
///   weak password)
/// - `502 Bad Gateway`: the provider could not be reached
///
/// Admin membership itself is granted through the `admin_users` table, not
/// at sign-up; a fresh account cannot pass the gate until membership
/// exists.
#[tracing::instrument(skip(data, form), fields(email = %form.email))]
pub async fn sign_up(
    data: web::Data<AppState>,
    form: web::Json<SignUpRequest>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({"error": first_violation(&e)}));
    }

    match AuthService::sign_up(&data, &form.name, &form.email, &form.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "Admin account created");
            HttpResponse::Ok().json(session)
        }
        Err(AuthError::Provider {
            code,
            error_code,
            msg,
        }) => {
            tracing::warn!(code = code, error_code = %error_code, "Provider rejected sign-up");
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status)
                .json(serde_json::json!({"error": msg, "error_code": error_code}))
        }
        Err(e) => {
            tracing::error!(error = ?e, "Sign-up failed");
            HttpResponse::BadGateway().json(serde_json::json!({"error": e.to_string()}))
        }
    }
}

/// Authenticates an admin and returns the provider session.
///
/// # HTTP Method
/// `POST /api/admin/sign-in`
///
/// The returned `access_token` goes into the `Authorization: Bearer` header
/// of subsequent admin requests. Invalid credentials surface with the
/// provider's status code; validation failures answer 400 with the first
/// violated rule's message.
#[tracing::instrument(skip(data, form), fields(email = %form.email))]
pub async fn sign_in(
    data: web::Data<AppState>,
    form: web::Json<SignInRequest>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({"error": first_violation(&e)}));
    }

    match AuthService::sign_in(&data, &form.email, &form.password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "Admin signed in");
            HttpResponse::Ok().json(session)
        }
        Err(AuthError::Provider {
            code,
            error_code,
            msg,
        }) => {
            tracing::warn!(code = code, error_code = %error_code, "Provider rejected sign-in");
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status)
                .json(serde_json::json!({"error": msg, "error_code": error_code}))
        }
        Err(e) => {
            tracing::error!(error = ?e, "Sign-in failed");
            HttpResponse::BadGateway().json(serde_json::json!({"error": e.to_string()}))
        }
    }
}
