//! Health check
//!
//! Reporta el estado del servicio y de sus dependencias. Siempre responde
//! 200 con el mismo shape; `status` pasa a `unhealthy` si la base de datos
//! no contesta.

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::database::verify_database_connection;
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database_ok = verify_database_connection(&state.pool).await;

    Json(json!({
        "status": if database_ok { "healthy" } else { "unhealthy" },
        "service": state.config.service_name,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": {
            "database": if database_ok { "connected" } else { "disconnected" }
        }
    }))
}
