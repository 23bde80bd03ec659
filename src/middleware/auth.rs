//! Autenticación JWT
//!
//! Este módulo maneja la extracción del bearer token y la verificación de
//! la firma HS256. No consulta ninguna base de usuarios: la identidad vive
//! en el user-service y acá solo se confía en la firma compartida. El
//! controller recibe un driver id ya verificado.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado extraído del bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extraer token del header Authorization
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|auth_str| auth_str.to_str().ok())
            .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

        // Decodificar y validar JWT
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Jwt("Token inválido".to_string()))?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AppError::Jwt("ID de usuario inválido".to_string()))?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Generar un JWT firmado para un usuario (usado por los tests; en
/// producción los tokens los emite el user-service con el mismo secreto)
#[cfg(test)]
pub fn generate_token(user_id: Uuid, secret: &str) -> String {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_ref()),
    )
    .expect("token signing cannot fail with a valid secret")
}
