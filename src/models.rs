//! Shared application state and the read models mirrored from the booking
//! backend.
//!
//! The booking and seat structs are not persisted here; they deserialize
//! rows returned by the hosted booking service and serialize unchanged into
//! action results for the admin UI.

use std::{env, sync::Arc};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{config::AuthMode, db};

/// A booking row as returned by the hosted booking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Booking's unique identifier
    pub id: Uuid,
    /// Opaque reference the passenger uses to look the booking up
    pub booking_reference: String,
    /// Name the booking was made under
    pub passenger_name: String,
    /// Flight the booking belongs to
    pub flight_id: Uuid,
    /// Cabin class booked (e.g. "economy", "business")
    pub cabin_class: String,
    /// Assigned seat, if one has been allocated
    pub seat_number: Option<String>,
    /// Current booking status, owned by the backend state machine
    pub status: String,
    /// Payment channel used, once the booking is paid
    pub payment_method: Option<String>,
    /// Total fare amount
    pub total_amount: Option<f64>,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

/// A seat on a flight, with its current availability flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    /// Seat's unique identifier
    pub id: Uuid,
    /// Flight the seat belongs to
    pub flight_id: Uuid,
    /// Row/letter designation (e.g. "12A")
    pub seat_number: String,
    /// Cabin class the seat sits in
    pub cabin_class: String,
    /// Whether the seat can still be allocated
    pub is_available: bool,
}

/// Admin membership record from the `admin_users` table.
#[derive(Debug, FromRow)]
pub struct AdminRecord {
    /// Identity the membership belongs to
    pub user_id: Uuid,
    /// Granted admin role
    pub role: String,
}

/// Shared application state for all handlers.
///
/// Holds the SQLx Postgres pool for admin membership lookups, the Supabase
/// credentials for the booking and auth services, and the gate mode fixed
/// at startup.
#[derive(Clone)]
pub struct AppState {
    /// SQLx Postgres connection pool
    pub db: Arc<sqlx::PgPool>,
    /// Supabase REST API URL
    pub supabase_url: String,
    /// Supabase service key for privileged booking-service calls
    pub supabase_service_key: String,
    /// Supabase anon key sent as the `apikey` header
    pub supabase_anon_key: String,
    /// Authentication gate mode, resolved once from the environment
    pub auth_mode: AuthMode,
}

impl AppState {
    /// Builds the application state from the environment.
    ///
    /// Requires `SUPABASE_URL`, `SUPABASE_SERVICE_KEY`, `SUPABASE_ANON_KEY`
    /// and `DATABASE_URL`; reads the gate mode from `BYPASS_ADMIN_AUTH` /
    /// `MOCK_ADMIN_AUTH`. This is the only place the process environment is
    /// consulted for configuration.
    pub fn new() -> anyhow::Result<Self> {
        let supabase_url = env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let supabase_service_key =
            env::var("SUPABASE_SERVICE_KEY").context("SUPABASE_SERVICE_KEY must be set")?;
        let supabase_anon_key =
            env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;
        let db = db::connect_pg_pool()?;

        Ok(Self {
            db: Arc::new(db),
            supabase_url,
            supabase_service_key,
            supabase_anon_key,
            auth_mode: AuthMode::from_env(),
        })
    }
}
