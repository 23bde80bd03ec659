//! Controller de rides
//!
//! Orquesta el descubrimiento y la publicación: verifica al conductor contra
//! el servicio de identidad, valida el draft, delega en el repositorio y
//! aplica el filtrado por proximidad sobre el conjunto candidato.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::clients::IdentityResolver;
use crate::dto::ride_dto::{CreateRideRequest, SearchRidesParams};
use crate::models::ride::{NewRide, Ride, RideStatus};
use crate::repositories::{CandidateFilter, RideStore};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::geo::{haversine_distance_km, is_within_radius};

#[derive(Clone)]
pub struct RideController {
    store: Arc<dyn RideStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl RideController {
    pub fn new(store: Arc<dyn RideStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { store, identity }
    }

    /// Publicar un ride: verificar conductor, validar draft, persistir.
    /// El estado siempre queda en `active`, sin importar el caller.
    pub async fn publish(&self, driver_id: Uuid, request: CreateRideRequest) -> AppResult<Ride> {
        // 1. Verificar conductor contra el servicio de identidad.
        // Si la verificación falla no se escribe nada.
        let driver = self
            .identity
            .resolve_driver(driver_id)
            .await?
            .ok_or_else(|| {
                AppError::DriverNotFound("El conductor no existe en el servicio de identidad".to_string())
            })?;

        if driver.driver_license_verified == Some(false) {
            return Err(AppError::Forbidden(
                "La licencia del conductor no está verificada".to_string(),
            ));
        }

        // 2. Validar el draft contra los invariantes del modelo
        request.validate()?;

        // Precio con exactamente 2 decimales en la representación persistida
        let mut price = request.price_per_seat;
        price.rescale(2);

        // 3. Persistir con estado active
        let new_ride = NewRide {
            driver_id,
            origin_address: request.origin.address,
            origin_lat: request.origin.lat,
            origin_lng: request.origin.lng,
            destination_address: request.destination.address,
            destination_lat: request.destination.lat,
            destination_lng: request.destination.lng,
            departure_time: request.departure_time,
            available_seats: request.available_seats,
            price_per_seat: price,
            vehicle_make: request.vehicle.make,
            vehicle_model: request.vehicle.model,
            vehicle_year: request.vehicle.year,
            vehicle_license_plate: request.vehicle.license_plate,
            vehicle_color: request.vehicle.color,
            preferences: request.preferences,
            is_recurring: request.is_recurring,
            recurring_schedule: request.recurring_schedule,
            notes: request.notes,
        };

        let ride = self.store.create(new_ride).await?;
        log::info!(
            "🚗 Ride {} publicado por {} ({})",
            ride.id,
            driver.full_name.as_deref().unwrap_or("conductor sin nombre"),
            driver_id
        );
        Ok(ride)
    }

    /// Buscar rides: predicado grueso en SQL, filtrado fino por radio en
    /// memoria. Orden determinístico: por distancia ascendente cuando hay
    /// origen, por hora de salida ascendente cuando no.
    pub async fn search(&self, params: SearchRidesParams) -> AppResult<Vec<Ride>> {
        params.validate()?;

        let filter = CandidateFilter {
            min_seats: params.min_seats,
            departure_after: Utc::now(),
            departure_date: params.departure_date,
        };
        let candidates = self.store.find_candidates(&filter).await?;

        let rides = match (params.origin_lat, params.origin_lng) {
            (Some(lat), Some(lng)) => {
                let mut matched: Vec<Ride> = candidates
                    .into_iter()
                    .filter(|ride| {
                        is_within_radius(
                            ride.origin_lat,
                            ride.origin_lng,
                            lat,
                            lng,
                            params.proximity_km,
                        )
                    })
                    .collect();
                matched.sort_by(|a, b| {
                    let da = haversine_distance_km(lat, lng, a.origin_lat, a.origin_lng);
                    let db = haversine_distance_km(lat, lng, b.origin_lat, b.origin_lng);
                    da.total_cmp(&db)
                });
                matched
            }
            _ => {
                let mut rides = candidates;
                rides.sort_by_key(|ride| ride.departure_time);
                rides
            }
        };

        Ok(rides)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Ride> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))
    }

    /// Reservar un asiento. Llegar a 0 asientos pasa el ride a `full`
    /// dentro de la misma operación atómica del repositorio.
    pub async fn book_seat(&self, id: Uuid) -> AppResult<Ride> {
        if let Some(ride) = self.store.reserve_seat(id).await? {
            log::info!(
                "🎟️ Asiento reservado en ride {} ({} restantes)",
                ride.id,
                ride.available_seats
            );
            return Ok(ride);
        }

        match self.store.find_by_id(id).await? {
            None => Err(AppError::NotFound("Ride no encontrado".to_string())),
            Some(ride) => Err(AppError::Conflict(format!(
                "El ride no admite reservas (estado: {}, asientos: {})",
                ride.status.as_str(),
                ride.available_seats
            ))),
        }
    }

    /// Liberar un asiento reservado. Un ride `full` vuelve a `active`.
    pub async fn cancel_booking(&self, id: Uuid) -> AppResult<Ride> {
        if let Some(ride) = self.store.release_seat(id).await? {
            log::info!(
                "↩️ Asiento liberado en ride {} ({} disponibles)",
                ride.id,
                ride.available_seats
            );
            return Ok(ride);
        }

        match self.store.find_by_id(id).await? {
            None => Err(AppError::NotFound("Ride no encontrado".to_string())),
            Some(ride) if ride.status.is_terminal() => Err(AppError::Conflict(format!(
                "El ride ya está {}",
                ride.status.as_str()
            ))),
            Some(_) => Err(AppError::Conflict(
                "El ride ya está en capacidad máxima".to_string(),
            )),
        }
    }

    /// Cancelación iniciada por el conductor. No se borra nada: es una
    /// transición de estado terminal.
    pub async fn cancel(&self, id: Uuid, driver_id: Uuid) -> AppResult<Ride> {
        self.finish(id, driver_id, RideStatus::Cancelled).await
    }

    /// Marcar un ride como completado (iniciado por el conductor).
    pub async fn complete(&self, id: Uuid, driver_id: Uuid) -> AppResult<Ride> {
        self.finish(id, driver_id, RideStatus::Completed).await
    }

    async fn finish(&self, id: Uuid, driver_id: Uuid, to: RideStatus) -> AppResult<Ride> {
        let ride = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))?;

        if ride.driver_id != driver_id {
            return Err(AppError::Forbidden(
                "El ride pertenece a otro conductor".to_string(),
            ));
        }

        if !ride.status.can_transition_to(to) {
            return Err(AppError::Conflict(format!(
                "Transición inválida: {} -> {}",
                ride.status.as_str(),
                to.as_str()
            )));
        }

        // El guard del repositorio cubre la carrera entre el check de
        // arriba y el UPDATE.
        self.store
            .transition_status(id, to)
            .await?
            .ok_or_else(|| AppError::Conflict("El ride cambió de estado".to_string()))
    }
}
