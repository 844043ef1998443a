//! Admin handler module organization and route configuration.
//!
//! This module organizes the admin endpoint handlers and provides
//! centralized route configuration for the booking administration surface:
//! authentication, booking lookup and deletion, seat queries, and payment
//! processing.

pub mod auth;
pub mod bookings;
pub mod payments;
pub mod seats;

/// Configures all administrative routes under the `/api/admin` scope.
///
/// # Route Structure
/// ```text
/// /api/admin/
/// ├── POST /sign-up                    - Admin account registration
/// ├── POST /sign-in                    - Admin authentication
/// ├── POST /bookings/lookup            - Look up a booking by reference
/// ├── POST /bookings/delete            - Delete a set of bookings
/// ├── GET  /bookings/confirm-delete    - Deletion confirmation prompt
/// ├── GET  /seats                      - List seats for a flight
/// ├── GET  /seats/availability         - Count available seats per cabin
/// └── POST /payments                   - Process a booking payment
/// ```
///
/// The sign-in and sign-up routes stay outside the authentication gate;
/// every other route mounts [`crate::auth_gate::AdminGate`] and is
/// unreachable without an admin session (or a development gate mode).
pub fn configure_admin_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/api/admin")
            // Authentication routes (no gate)
            .route("/sign-up", actix_web::web::post().to(auth::sign_up))
            .route("/sign-in", actix_web::web::post().to(auth::sign_in))
            // Booking management routes
            .route(
                "/bookings/lookup",
                actix_web::web::post().to(bookings::lookup_booking),
            )
            .route(
                "/bookings/delete",
                actix_web::web::post().to(bookings::delete_bookings),
            )
            .route(
                "/bookings/confirm-delete",
                actix_web::web::get().to(bookings::confirm_delete_prompt),
            )
            // Seat queries
            .route("/seats", actix_web::web::get().to(seats::get_seats))
            .route(
                "/seats/availability",
                actix_web::web::get().to(seats::get_availability),
            )
            // Payment processing
            .route(
                "/payments",
                actix_web::web::post().to(payments::process_payment),
            ),
    );
}
