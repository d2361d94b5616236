// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-Carbon Server - Floor plan carbon analysis over HTTP.
//!
//! Accepts a floor-plan PDF upload, parses the room inventory from the
//! positioned text on page one, calculates the material carbon
//! footprint, and returns reduction recommendations.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/analyze` - Analyze an uploaded floor-plan PDF (JSON)

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

mod config;
mod error;
mod routes;
mod types;

use config::Config;
use plan_carbon_report::{MaterialDb, RecommendationTables};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub material_db: Arc<MaterialDb>,
    pub recommendation_tables: Arc<RecommendationTables>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,plan_carbon_server=debug".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        upload_dir = %config.upload_dir,
        max_file_size_mb = config.max_file_size_mb,
        "Starting Plan-Carbon Server"
    );

    // Upload staging directory must exist before the first request.
    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        tracing::error!(dir = %config.upload_dir, error = %e, "Cannot create upload directory");
        std::process::exit(1);
    }

    let state = AppState {
        config: Arc::new(config.clone()),
        material_db: Arc::new(MaterialDb::default()),
        recommendation_tables: Arc::new(RecommendationTables::default()),
    };

    // Build router
    let app = Router::new()
        .route("/", get(routes::health::info))
        .route("/api/v1/health", get(routes::health::check))
        .route("/api/v1/analyze", post(routes::analyze::analyze))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_file_size_mb * 1024 * 1024))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
