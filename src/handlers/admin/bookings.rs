//! Admin booking actions: lookup by reference and bulk deletion.
//!
//! Both actions follow the shared wrapper shape: validate the raw form
//! input, call exactly one booking-service delegate, and answer with the
//! uniform [`ActionResult`] envelope. No failure inside an action ever
//! surfaces as a non-200 response; the gate alone answers with redirects.

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    auth_gate::AdminGate,
    data::{ActionResult, first_violation},
    models::Booking,
    services::BookingService,
    ui::ConfirmDeleteModal,
};

#[derive(Debug, Deserialize, Validate)]
pub struct LookupBookingForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Booking reference is required"))]
    pub booking_reference: String,
}

/// Looks up a booking by its reference for the admin booking page.
///
/// # HTTP Method
/// `POST /api/admin/bookings/lookup` (form field `booking_reference`)
///
/// # Responses (always 200)
/// - `{"success": true, "data": {booking}}` when the reference matches
/// - `{"success": false, "error": "Booking not found"}` when it does not;
///   this is a domain outcome, distinct from validation and transport
///   failures
/// - `{"success": false, "error": <message>}` for any other failure
#[tracing::instrument(
    skip(admin, state, form),
    fields(admin_id = %admin.id, booking_reference = %form.booking_reference)
)]
pub async fn lookup_booking(
    admin: AdminGate,
    state: web::Data<AppState>,
    web::Form(form): web::Form<LookupBookingForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::Ok().json(ActionResult::<Booking>::fail(first_violation(&e)));
    }

    match BookingService::find_by_reference(&state, &form.booking_reference).await {
        Ok(Some(booking)) => {
            tracing::info!(booking_id = %booking.id, "Booking found");
            HttpResponse::Ok().json(ActionResult::ok(booking))
        }
        Ok(None) => {
            tracing::warn!("No booking matches reference");
            HttpResponse::Ok().json(ActionResult::<Booking>::fail("Booking not found"))
        }
        Err(e) => {
            tracing::error!(error = ?e, "Booking lookup failed");
            HttpResponse::Ok().json(ActionResult::<Booking>::fail(e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookingsForm {
    // Plain form submissions cannot carry a structured array, so the page
    // serializes the selection into one JSON-encoded field.
    #[serde(default)]
    pub booking_ids: String,
}

/// Deletes a set of bookings through the bulk-delete remote procedure.
///
/// # HTTP Method
/// `POST /api/admin/bookings/delete` (form field `booking_ids` holding a
/// JSON array of booking UUIDs)
///
/// Input failures keep their two modes distinct: unparsable JSON answers
/// with the format message, while a parsed-but-invalid selection (empty
/// array, non-UUID element) answers with the matching schema message. The
/// whole id set travels in a single procedure call; partial failure
/// semantics belong to the procedure, not to this wrapper.
#[tracing::instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn delete_bookings(
    admin: AdminGate,
    state: web::Data<AppState>,
    web::Form(form): web::Form<DeleteBookingsForm>,
) -> impl Responder {
    let ids: Vec<String> = match serde_json::from_str(&form.booking_ids) {
        Ok(ids) => ids,
        Err(_) => {
            tracing::warn!("Booking selection field is not valid JSON");
            return HttpResponse::Ok()
                .json(ActionResult::<()>::fail("Invalid booking selection format"));
        }
    };

    if ids.is_empty() {
        return HttpResponse::Ok()
            .json(ActionResult::<()>::fail("Select at least one booking to delete"));
    }

    let mut booking_ids = Vec::with_capacity(ids.len());
    for id in &ids {
        match Uuid::parse_str(id) {
            Ok(uuid) => booking_ids.push(uuid),
            Err(_) => {
                tracing::warn!(raw_id = %id, "Booking selection contains a non-UUID value");
                return HttpResponse::Ok()
                    .json(ActionResult::<()>::fail("Booking ids must be valid UUIDs"));
            }
        }
    }

    tracing::info!(count = booking_ids.len(), "Deleting bookings");
    match BookingService::delete_bookings(&state, &booking_ids).await {
        Ok(()) => {
            tracing::info!(count = booking_ids.len(), "Bookings deleted");
            HttpResponse::Ok().json(ActionResult::ok_empty())
        }
        Err(e) => {
            tracing::error!(error = ?e, "Bulk delete failed");
            HttpResponse::Ok().json(ActionResult::<()>::fail(e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmDeleteQuery {
    #[serde(default)]
    pub count: usize,
}

/// Serves the confirmation prompt shown before a bulk deletion.
///
/// Returns the open modal fragment; the hosting page wires its
/// `data-action` hooks to the delete action and its own close handling.
#[tracing::instrument(skip(admin, query), fields(admin_id = %admin.id))]
pub async fn confirm_delete_prompt(
    admin: AdminGate,
    web::Query(query): web::Query<ConfirmDeleteQuery>,
) -> impl Responder {
    let modal = ConfirmDeleteModal {
        open: true,
        count: query.count,
    };
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(modal.render().unwrap_or_default())
}
