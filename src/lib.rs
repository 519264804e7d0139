//! Backend de transporte escolar
//!
//! Construcción de rutas con control de capacidad y seguimiento en vivo de
//! los vans para los dashboards de las agencias.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_middleware;
use state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/routes", routes::route_routes::create_route_router())
        .merge(routes::tracking_routes::create_tracking_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "subscribers": state.tracking_hub.subscriber_count().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
