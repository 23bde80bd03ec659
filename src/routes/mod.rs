//! Rutas de la API
//!
//! Este módulo arma el router principal del servicio.

pub mod health_routes;
pub mod ride_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api/v1/rides", ride_routes::create_ride_router())
        .with_state(state)
}
