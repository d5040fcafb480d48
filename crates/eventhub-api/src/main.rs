//! Eventhub booking API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use eventhub_api::config::ServerConfig;
use eventhub_api::error::AppError;
use eventhub_api::routes;
use eventhub_api::state::AppState;
use eventhub_api::telemetry;
use eventhub_core::clock::SystemClock;
use eventhub_store::MIGRATOR;
use eventhub_store::pg_booking_store::PgBookingStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    let provider = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!(
        missing_enrollment = %config.policy.missing_enrollment,
        visibility = %config.policy.visibility,
        "Starting Eventhub booking API server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    MIGRATOR.run(&pool).await?;

    let store = Arc::new(PgBookingStore::new(pool, Arc::new(SystemClock)));
    let app_state = AppState::from_store(store, config.policy);

    // TODO: Replace CorsLayer::permissive() with the front-end origin once it is fixed.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    telemetry::shutdown_tracing(provider);
    served.map_err(AppError::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
