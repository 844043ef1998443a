mod auth;
mod bookings;

pub use auth::*;
pub use bookings::*;

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;

use crate::AppState;

/// Process-wide HTTP client for all backend calls.
///
/// Every backend call is single-attempt; the timeout bounds the wait so a
/// hung backend cannot hang an admin action indefinitely.
pub(crate) static HTTP: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("failed to build http client")
});

pub(crate) fn base_url(state: &AppState) -> &str {
    state.supabase_url.trim_end_matches('/')
}
