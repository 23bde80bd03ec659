//! Conexión a PostgreSQL
//!
//! Este módulo maneja la verificación de la conexión a la base de datos,
//! usada por el health check.

use sqlx::PgPool;

/// Verificar que la conexión a la base de datos funciona (SELECT 1)
pub async fn verify_database_connection(pool: &PgPool) -> bool {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Database health check failed: {}", e);
            false
        }
    }
}
