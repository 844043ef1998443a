//! Booking service delegates backed by the hosted database service.
//!
//! This module is the only place that talks to the booking backend. Each
//! function performs exactly one call against the Supabase REST surface
//! (`/rest/v1`) or a remote procedure under `/rest/v1/rpc`, and maps the
//! outcome into [`ServiceError`]. Booking lifecycle rules (seat allocation,
//! payment semantics, deletion cascades) live behind that boundary and are
//! not reproduced here.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    AppState,
    models::{Booking, Seat},
};

use super::{HTTP, base_url};

/// Failure reported by a booking-service delegate.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend could not be reached or the request failed in transit.
    #[error("Unable to reach the booking service: {0}")]
    Request(String),
    /// The backend answered with a body that does not match its contract.
    #[error("Received an invalid response from the booking service: {0}")]
    Parse(String),
    /// The backend reported an error for the request.
    #[error("Booking service error {code}: {msg}")]
    Backend { code: u16, msg: String },
    /// A business failure reported inside a success envelope; the message
    /// is surfaced to the UI verbatim.
    #[error("{0}")]
    Rejected(String),
}

/// Error body shape returned by the REST surface.
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// One element of the result array returned by the `delete_bookings`
/// remote procedure. The procedure reports for the whole batch through its
/// first element.
#[derive(Debug, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Service layer for booking, seat, and payment operations.
///
/// All methods are async, single-attempt, and return structured errors for
/// uniform handling in the action wrappers.
pub struct BookingService;

impl BookingService {
    /// Looks up a booking by its opaque reference.
    ///
    /// Returns `Ok(None)` when no booking matches; the caller owns the
    /// not-found message.
    pub async fn find_by_reference(
        state: &AppState,
        reference: &str,
    ) -> Result<Option<Booking>, ServiceError> {
        let res = HTTP
            .get(format!("{}/rest/v1/bookings", base_url(state)))
            .query(&[
                ("booking_reference", format!("eq.{reference}")),
                ("select", "*".to_string()),
                ("limit", "1".to_string()),
            ])
            .header("apikey", &state.supabase_anon_key)
            .bearer_auth(&state.supabase_service_key)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        let rows: Vec<Booking> = res
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        Ok(rows.into_iter().next())
    }

    /// Lists the seats of a flight, optionally narrowed to one cabin class.
    ///
    /// Omitting the cabin returns seats across all cabins; that policy is
    /// owned by the backend query, not decided here.
    pub async fn seats_for_flight(
        state: &AppState,
        flight_id: Uuid,
        cabin_class: Option<&str>,
    ) -> Result<Vec<Seat>, ServiceError> {
        let mut query = vec![
            ("flight_id".to_string(), format!("eq.{flight_id}")),
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "seat_number.asc".to_string()),
        ];
        if let Some(cabin) = cabin_class {
            query.push(("cabin_class".to_string(), format!("eq.{cabin}")));
        }

        let res = HTTP
            .get(format!("{}/rest/v1/seats", base_url(state)))
            .query(&query)
            .header("apikey", &state.supabase_anon_key)
            .bearer_auth(&state.supabase_service_key)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        res.json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Counts the available seats of a flight, optionally per cabin class.
    ///
    /// Uses the REST surface's exact-count mode: the request asks for zero
    /// rows and reads the total from the `Content-Range` header.
    pub async fn available_seat_count(
        state: &AppState,
        flight_id: Uuid,
        cabin_class: Option<&str>,
    ) -> Result<i64, ServiceError> {
        let mut query = vec![
            ("flight_id".to_string(), format!("eq.{flight_id}")),
            ("is_available".to_string(), "eq.true".to_string()),
            ("select".to_string(), "id".to_string()),
        ];
        if let Some(cabin) = cabin_class {
            query.push(("cabin_class".to_string(), format!("eq.{cabin}")));
        }

        let res = HTTP
            .get(format!("{}/rest/v1/seats", base_url(state)))
            .query(&query)
            .header("apikey", &state.supabase_anon_key)
            .bearer_auth(&state.supabase_service_key)
            .header("Prefer", "count=exact")
            .header("Range-Unit", "items")
            .header("Range", "0-0")
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        let content_range = res
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ServiceError::Parse("missing Content-Range header".to_string()))?;

        // Header shape is "0-0/57", or "*/0" when the range is empty.
        content_range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse::<i64>().ok())
            .ok_or_else(|| {
                ServiceError::Parse(format!("unexpected Content-Range: {content_range}"))
            })
    }

    /// Marks a booking as paid with the given payment method.
    ///
    /// The state transition itself is performed by the backend; this call
    /// makes no atomicity guarantee of its own.
    pub async fn process_payment(
        state: &AppState,
        booking_id: Uuid,
        payment_method: &str,
    ) -> Result<(), ServiceError> {
        let res = HTTP
            .patch(format!("{}/rest/v1/bookings", base_url(state)))
            .query(&[("id", format!("eq.{booking_id}"))])
            .header("apikey", &state.supabase_anon_key)
            .bearer_auth(&state.supabase_service_key)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({
                "status": "paid",
                "payment_method": payment_method,
            }))
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        let rows: Vec<serde_json::Value> = res
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        if rows.is_empty() {
            return Err(ServiceError::Rejected("Booking not found".to_string()));
        }
        Ok(())
    }

    /// Deletes a set of bookings through the `delete_bookings` remote
    /// procedure.
    ///
    /// The whole id set travels in one call and the procedure reports for
    /// the batch through the first element of its result array; an absent
    /// or empty array, or a falsy `success` flag, is uniform failure.
    /// All-or-nothing semantics are assumed from the procedure's contract,
    /// not verified here.
    pub async fn delete_bookings(
        state: &AppState,
        booking_ids: &[Uuid],
    ) -> Result<(), ServiceError> {
        let res = HTTP
            .post(format!("{}/rest/v1/rpc/delete_bookings", base_url(state)))
            .header("apikey", &state.supabase_anon_key)
            .bearer_auth(&state.supabase_service_key)
            .json(&serde_json::json!({ "booking_ids": booking_ids }))
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        if !res.status().is_success() {
            return Err(Self::backend_error(res).await);
        }

        let outcomes: Vec<DeleteOutcome> = res
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        match outcomes.first() {
            Some(outcome) if outcome.success => Ok(()),
            Some(outcome) => Err(ServiceError::Rejected(
                outcome
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Failed to delete bookings".to_string()),
            )),
            None => Err(ServiceError::Rejected(
                "Delete returned no result".to_string(),
            )),
        }
    }

    async fn backend_error(res: reqwest::Response) -> ServiceError {
        let code = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<RestErrorBody>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "request failed".to_string()
                } else {
                    body.trim().to_string()
                }
            });
        ServiceError::Backend { code, msg }
    }
}
