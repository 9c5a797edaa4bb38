//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::domain::Catalog;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command.
///
/// A database that cannot be connected or migrated is fatal; the server
/// never starts serving against an uninitialized store.
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let db = Arc::new(
        Database::connect(&config)
            .await
            .map_err(|e| AppError::internal(format!("Database initialization failed: {}", e)))?,
    );
    tracing::info!("Database connected and migrated");

    let catalog = Arc::new(Catalog::embedded());
    tracing::info!(destinations = catalog.all().len(), "Catalog loaded");

    // Application state wires the service container over the Unit of Work
    let app_state = AppState::from_config(db, catalog);

    let app = create_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
