//! Main entry point for the aerodesk_server backend.
//!
//! Sets up the Actix Web server, registers the booking administration
//! routes, and initializes shared application state (database pool,
//! Supabase keys, authentication gate mode). Uses dotenv for config and
//! launches the async runtime with structured tracing.

use actix_web::{App, HttpServer, middleware::Logger, web};
use aerodesk::{AppState, get_subscriber, handlers, init_subscriber};
use dotenv::dotenv;
use tracing_actix_web::TracingLogger;

/// Main entry point. Configures and runs the Actix Web server.
///
/// - Loads environment variables from `.env`.
/// - Builds the application state, resolving the gate mode once.
/// - Initializes structured JSON tracing.
/// - Registers the health and admin routes with middleware.
/// - Launches the async server runtime with graceful shutdown.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let app_state = AppState::new()?;

    let subscriber = get_subscriber("aerodesk".to_string(), "info".to_string(), std::io::stdout);
    init_subscriber(subscriber);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(TracingLogger::default())
            .wrap(Logger::default())
            .route(
                "/api/health",
                web::get().to(handlers::health::health_check),
            )
            .configure(handlers::admin::configure_admin_routes)
    })
    .bind(("127.0.0.1", 8080))?
    .run();

    let srv_handle = server.handle();

    let server_task = tokio::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Shutdown signal received");
            srv_handle.stop(true).await;
        }
        res = server_task => {
            if let Err(e) = res {
                tracing::error!("Server task failed: {}", e);
            }
        }
    }

    Ok(())
}
