//! Cliente del servicio de identidad
//!
//! Este módulo contiene el cliente HTTP para resolver perfiles de conductor
//! contra el user-service. El trait `IdentityResolver` es la frontera de
//! confianza entre servicios: el orquestador decide qué hacer con la
//! ausencia, el cliente solo reporta lo que el upstream contestó.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Timeout de conexión al servicio de identidad
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout total de la llamada
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Perfil de conductor resuelto por el servicio de identidad
#[derive(Debug, Clone, Deserialize)]
pub struct DriverProfile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub driver_license_verified: Option<bool>,
}

/// Resolución de identidad de conductores.
///
/// `Ok(None)` significa que el usuario no existe (404 definitivo, nunca se
/// reintenta). Un fallo de red o un status inesperado NO es ausencia:
/// se reporta como `UpstreamUnavailable`.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve_driver(&self, driver_id: Uuid) -> AppResult<Option<DriverProfile>>;
}

/// Cliente HTTP del user-service
pub struct HttpIdentityClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpIdentityClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityClient {
    async fn resolve_driver(&self, driver_id: Uuid) -> AppResult<Option<DriverProfile>> {
        let url = format!(
            "{}/api/v1/users/{}",
            self.base_url.trim_end_matches('/'),
            driver_id
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("❌ Error connecting to identity service: {}", e);
            AppError::UpstreamUnavailable(format!("identity service unreachable: {}", e))
        })?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let profile: DriverProfile = response.json().await.map_err(|e| {
                    log::error!("❌ Invalid identity response for {}: {}", driver_id, e);
                    AppError::UpstreamUnavailable(format!("invalid identity response: {}", e))
                })?;
                log::info!("✅ Driver {} resolved", profile.id);
                Ok(Some(profile))
            }
            404 => Ok(None),
            _ => {
                log::error!("❌ Error fetching user {}: Status {}", driver_id, status);
                Err(AppError::UpstreamUnavailable(format!(
                    "identity service returned status {}",
                    status
                )))
            }
        }
    }
}
