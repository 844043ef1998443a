//! Admin payment action.

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    auth_gate::AdminGate,
    data::{ActionResult, first_violation},
    services::BookingService,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessPaymentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Booking id is required"))]
    pub booking_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Select a payment method"))]
    pub payment_method: String,
}

/// Processes a payment for a booking.
///
/// # HTTP Method
/// `POST /api/admin/payments` (form fields `booking_id`, `payment_method`)
///
/// There is no payload beyond success or failure; the booking state
/// transition is performed by the backend delegate. The payment method
/// string is opaque to this layer.
#[tracing::instrument(
    skip(admin, state, form),
    fields(admin_id = %admin.id, payment_method = %form.payment_method)
)]
pub async fn process_payment(
    admin: AdminGate,
    state: web::Data<AppState>,
    web::Form(form): web::Form<ProcessPaymentForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return HttpResponse::Ok().json(ActionResult::<()>::fail(first_violation(&e)));
    }

    let booking_id = match Uuid::parse_str(&form.booking_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::Ok()
                .json(ActionResult::<()>::fail("Booking id must be a valid UUID"));
        }
    };

    match BookingService::process_payment(&state, booking_id, &form.payment_method).await {
        Ok(()) => {
            tracing::info!(booking_id = %booking_id, "Payment processed");
            HttpResponse::Ok().json(ActionResult::ok_empty())
        }
        Err(e) => {
            tracing::error!(booking_id = %booking_id, error = ?e, "Payment failed");
            HttpResponse::Ok().json(ActionResult::<()>::fail(e.to_string()))
        }
    }
}
