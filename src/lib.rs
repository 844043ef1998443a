//! Library entry point for the aerodesk booking-administration backend.
//!
//! Exports all core modules for use in integration tests and by the main binary.

pub mod auth_gate;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod ui;

pub use auth_gate::*;
pub use config::*;
pub use db::*;
pub use handlers::*;
pub use models::*;
pub use services::*;
pub use telemetry::*;
pub use ui::*;
