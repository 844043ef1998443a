//! Database connection utilities for the aerodesk backend.
//!
//! Provides a function to create a connection pool to the Postgres database
//! holding the `admin_users` membership table. The pool connects lazily so
//! the server can boot before Postgres is reachable; the first membership
//! lookup establishes the connection.

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;

/// Builds a lazy connection pool from the `DATABASE_URL` environment variable.
///
/// # Errors
/// Fails if `DATABASE_URL` is unset or is not a valid Postgres URL.
pub fn connect_pg_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&database_url)
        .context("Failed to create Postgres pool")
}
