// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip Planner API Server
//!
//! Serves trips, their ordered activities, expenses, date-grouped
//! itineraries and budget summaries to the planning frontend.

use std::sync::Arc;
use trip_planner::{
    config::{Config, StorageBackend},
    db::{ActivityStore, ExpenseStore, FirestoreDb, InMemoryStore, TripStore},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, storage = ?config.storage, "Starting Trip Planner API");

    match config.storage {
        StorageBackend::Firestore => {
            let db = FirestoreDb::new(&config.gcp_project_id).await?;
            serve(config, db).await
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            serve(config, InMemoryStore::new()).await
        }
    }
}

async fn serve<S: ActivityStore + ExpenseStore + TripStore>(
    config: Config,
    db: S,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(config.clone(), db));

    // Build router
    let app = trip_planner::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trip_planner=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
