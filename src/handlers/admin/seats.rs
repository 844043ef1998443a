//! Admin seat queries: seat listing and cabin availability.

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    auth_gate::AdminGate,
    data::{ActionResult, AvailabilityResult},
    models::Seat,
    services::BookingService,
};

#[derive(Debug, Deserialize)]
pub struct SeatQuery {
    #[serde(default)]
    pub flight_id: String,
    #[serde(default)]
    pub cabin_class: Option<String>,
}

fn parse_flight_id(raw: &str) -> Result<Uuid, String> {
    if raw.is_empty() {
        return Err("Flight id is required".to_string());
    }
    Uuid::parse_str(raw).map_err(|_| "Flight id must be a valid UUID".to_string())
}

// An empty cabin parameter means "all cabins", same as omitting it.
fn cabin_filter(cabin: &Option<String>) -> Option<&str> {
    cabin.as_deref().filter(|c| !c.is_empty())
}

/// Lists the seats of a flight, optionally narrowed to one cabin class.
///
/// # HTTP Method
/// `GET /api/admin/seats?flight_id=<uuid>[&cabin_class=<cabin>]`
///
/// Answers the uniform envelope with the seat array as `data`; omitting
/// the cabin returns seats across all cabins.
#[tracing::instrument(skip(admin, state, query), fields(admin_id = %admin.id, flight_id = %query.flight_id))]
pub async fn get_seats(
    admin: AdminGate,
    state: web::Data<AppState>,
    web::Query(query): web::Query<SeatQuery>,
) -> impl Responder {
    let flight_id = match parse_flight_id(&query.flight_id) {
        Ok(id) => id,
        Err(msg) => return HttpResponse::Ok().json(ActionResult::<Vec<Seat>>::fail(msg)),
    };

    match BookingService::seats_for_flight(&state, flight_id, cabin_filter(&query.cabin_class))
        .await
    {
        Ok(seats) => {
            tracing::info!(seat_count = seats.len(), "Seats listed");
            HttpResponse::Ok().json(ActionResult::ok(seats))
        }
        Err(e) => {
            tracing::error!(error = ?e, "Seat listing failed");
            HttpResponse::Ok().json(ActionResult::<Vec<Seat>>::fail(e.to_string()))
        }
    }
}

/// Counts the available seats of a flight, optionally per cabin class.
///
/// # HTTP Method
/// `GET /api/admin/seats/availability?flight_id=<uuid>[&cabin_class=<cabin>]`
///
/// The response always carries a numeric `count`; a failed lookup reports
/// zero alongside the error so the UI never renders an absent count.
#[tracing::instrument(skip(admin, state, query), fields(admin_id = %admin.id, flight_id = %query.flight_id))]
pub async fn get_availability(
    admin: AdminGate,
    state: web::Data<AppState>,
    web::Query(query): web::Query<SeatQuery>,
) -> impl Responder {
    let flight_id = match parse_flight_id(&query.flight_id) {
        Ok(id) => id,
        Err(msg) => return HttpResponse::Ok().json(AvailabilityResult::fail(msg)),
    };

    match BookingService::available_seat_count(
        &state,
        flight_id,
        cabin_filter(&query.cabin_class),
    )
    .await
    {
        Ok(count) => {
            tracing::info!(count = count, "Availability counted");
            HttpResponse::Ok().json(AvailabilityResult::ok(count))
        }
        Err(e) => {
            tracing::error!(error = ?e, "Availability count failed");
            HttpResponse::Ok().json(AvailabilityResult::fail(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_id_is_required() {
        assert_eq!(parse_flight_id("").unwrap_err(), "Flight id is required");
    }

    #[test]
    fn flight_id_must_be_uuid() {
        assert_eq!(
            parse_flight_id("not-a-uuid").unwrap_err(),
            "Flight id must be a valid UUID"
        );
        assert!(parse_flight_id("22222222-2222-2222-2222-222222222222").is_ok());
    }

    #[test]
    fn empty_cabin_means_all_cabins() {
        assert_eq!(cabin_filter(&None), None);
        assert_eq!(cabin_filter(&Some(String::new())), None);
        assert_eq!(cabin_filter(&Some("business".to_string())), Some("business"));
    }
}
