//! Dobles de test compartidos
//!
//! Store en memoria y resolver de identidad de prueba, con la misma
//! semántica de guards que la implementación PostgreSQL. Usados por los
//! tests de controllers y de rutas.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clients::{DriverProfile, IdentityResolver};
use crate::config::environment::EnvironmentConfig;
use crate::controllers::RideController;
use crate::dto::ride_dto::{CreateRideRequest, LocationPayload, VehiclePayload};
use crate::models::ride::{NewRide, Ride, RideStatus};
use crate::repositories::ride_repository::MAX_SEATS;
use crate::repositories::{CandidateFilter, RideStore};
use crate::utils::errors::{AppError, AppResult};

/// Store de rides en memoria con la semántica de guards del repositorio real
#[derive(Default)]
pub struct InMemoryRideStore {
    rides: RwLock<HashMap<Uuid, Ride>>,
}

impl InMemoryRideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rides.read().await.len()
    }

    /// Sembrar un ride activo con salida arbitraria (incluso pasada),
    /// salteando la validación de publicación.
    pub async fn seed_departed(&self, driver_id: Uuid, departure_time: DateTime<Utc>) -> Ride {
        let now = Utc::now();
        let ride = Ride {
            id: Uuid::new_v4(),
            driver_id,
            origin_address: "Calle Falsa 123, San José".to_string(),
            origin_lat: 37.33,
            origin_lng: -121.88,
            destination_address: "Avenida Siempreviva 742".to_string(),
            destination_lat: 37.44,
            destination_lng: -122.14,
            departure_time,
            available_seats: 2,
            price_per_seat: "10.00".parse().unwrap(),
            vehicle_make: "Honda".to_string(),
            vehicle_model: "Civic".to_string(),
            vehicle_year: 2018,
            vehicle_license_plate: "7XYZ999".to_string(),
            vehicle_color: None,
            preferences: None,
            status: RideStatus::Active,
            is_recurring: false,
            recurring_schedule: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        self.rides.write().await.insert(ride.id, ride.clone());
        ride
    }
}

#[async_trait]
impl RideStore for InMemoryRideStore {
    async fn create(&self, new: NewRide) -> AppResult<Ride> {
        let now = Utc::now();
        let ride = Ride {
            id: Uuid::new_v4(),
            driver_id: new.driver_id,
            origin_address: new.origin_address,
            origin_lat: new.origin_lat,
            origin_lng: new.origin_lng,
            destination_address: new.destination_address,
            destination_lat: new.destination_lat,
            destination_lng: new.destination_lng,
            departure_time: new.departure_time,
            available_seats: new.available_seats,
            price_per_seat: new.price_per_seat,
            vehicle_make: new.vehicle_make,
            vehicle_model: new.vehicle_model,
            vehicle_year: new.vehicle_year,
            vehicle_license_plate: new.vehicle_license_plate,
            vehicle_color: new.vehicle_color,
            preferences: new.preferences,
            status: RideStatus::Active,
            is_recurring: new.is_recurring,
            recurring_schedule: new.recurring_schedule,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        self.rides.write().await.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        Ok(self.rides.read().await.get(&id).cloned())
    }

    async fn find_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        Ok(rides
            .values()
            .filter(|ride| {
                ride.status == RideStatus::Active
                    && ride.available_seats >= filter.min_seats
                    && ride.departure_time >= filter.departure_after
                    && filter.departure_date.map_or(true, |date| {
                        let day_start = date.and_time(chrono::NaiveTime::MIN).and_utc();
                        let day_end = day_start + chrono::Duration::days(1);
                        ride.departure_time >= day_start && ride.departure_time < day_end
                    })
            })
            .cloned()
            .collect())
    }

    async fn reserve_seat(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if ride.status == RideStatus::Active && ride.available_seats >= 1 => {
                ride.available_seats -= 1;
                if ride.available_seats == 0 {
                    ride.status = RideStatus::Full;
                }
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn release_seat(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if !ride.status.is_terminal() && ride.available_seats < MAX_SEATS => {
                ride.available_seats += 1;
                if ride.status == RideStatus::Full {
                    ride.status = RideStatus::Active;
                }
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn transition_status(&self, id: Uuid, to: RideStatus) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if !ride.status.is_terminal() => {
                ride.status = to;
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }
}

/// Resolver de identidad de prueba
pub struct StubIdentityResolver {
    known: Vec<Uuid>,
    unverified: Vec<Uuid>,
    unavailable: bool,
}

impl StubIdentityResolver {
    pub fn with_driver(id: Uuid) -> Self {
        Self {
            known: vec![id],
            unverified: vec![],
            unavailable: false,
        }
    }

    pub fn with_unverified_driver(id: Uuid) -> Self {
        Self {
            known: vec![id],
            unverified: vec![id],
            unavailable: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            known: vec![],
            unverified: vec![],
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            known: vec![],
            unverified: vec![],
            unavailable: true,
        }
    }
}

#[async_trait]
impl IdentityResolver for StubIdentityResolver {
    async fn resolve_driver(&self, driver_id: Uuid) -> AppResult<Option<DriverProfile>> {
        if self.unavailable {
            return Err(AppError::UpstreamUnavailable(
                "identity service unreachable".to_string(),
            ));
        }
        if self.known.contains(&driver_id) {
            Ok(Some(DriverProfile {
                id: driver_id,
                full_name: Some("Test Driver".to_string()),
                driver_license_verified: Some(!self.unverified.contains(&driver_id)),
            }))
        } else {
            Ok(None)
        }
    }
}

/// Draft válido con origen y salida parametrizables
pub fn sample_draft(
    origin_lat: f64,
    origin_lng: f64,
    departure_time: DateTime<Utc>,
    available_seats: i32,
) -> CreateRideRequest {
    CreateRideRequest {
        origin: LocationPayload {
            address: "200 E Santa Clara St, San Jose".to_string(),
            lat: origin_lat,
            lng: origin_lng,
        },
        destination: LocationPayload {
            address: "1 Hacker Way, Menlo Park".to_string(),
            lat: 37.4419,
            lng: -122.1430,
        },
        departure_time,
        available_seats,
        price_per_seat: "12.50".parse().unwrap(),
        vehicle: VehiclePayload {
            make: "Toyota".to_string(),
            model: "Prius".to_string(),
            year: 2020,
            license_plate: "8ABC123".to_string(),
            color: None,
        },
        preferences: None,
        notes: None,
        is_recurring: false,
        recurring_schedule: None,
    }
}

/// Controller con store en memoria y un conductor registrado
pub async fn seeded_controller() -> (RideController, Arc<InMemoryRideStore>, Uuid) {
    let driver_id = Uuid::new_v4();
    let store = Arc::new(InMemoryRideStore::new());
    let controller = RideController::new(
        store.clone(),
        Arc::new(StubIdentityResolver::with_driver(driver_id)),
    );
    (controller, store, driver_id)
}

/// Configuración de entorno para tests (sin leer variables de entorno)
pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        service_name: "ride-service".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "secreto-de-test".to_string(),
        identity_service_url: "http://127.0.0.1:1".to_string(),
        cors_origins: vec![],
    }
}
