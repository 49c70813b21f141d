//! Lead Service Library
//!
//! This crate serves the lead-capture HTTP API: `POST /submit` stores one
//! lead, `GET /list` returns the most recent ones.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::LeadServiceConfig;
use crate::infra::Database;
use crate::repository::LeadStore;
use crate::routes::create_router;
use crate::service::LeadManager;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: LeadServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database handle
    let db = Database::connect(&config.database).await?;

    // Create repository and service
    let lead_repo = Arc::new(LeadStore::new(db.get_connection()));
    let lead_service = Arc::new(LeadManager::new(lead_repo));

    // Build address
    let addr: SocketAddr = config.server.addr().parse()?;

    // Build router
    let state = AppState::new(lead_service, config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Lead service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
