//! DTOs de rides
//!
//! Requests y responses de la API de rides. La validación declarativa vive
//! acá (rangos, longitudes); las reglas que el derive no expresa (precio
//! con 2 decimales, salida con 1h de antelación) delegan en
//! `utils::validation`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ride::{Ride, RideStatus};
use crate::utils::validation::{parse_datetime_utc, validate_departure_time, validate_price};

/// Ubicación con dirección y coordenadas
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationPayload {
    #[validate(length(min = 5, max = 500))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Información del vehículo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehiclePayload {
    #[validate(length(min = 2, max = 100))]
    pub make: String,

    #[validate(length(min = 2, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: String,

    #[validate(length(max = 50))]
    pub color: Option<String>,
}

/// Request para publicar un nuevo ride
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideRequest {
    #[validate]
    pub origin: LocationPayload,

    #[validate]
    pub destination: LocationPayload,

    #[serde(deserialize_with = "deserialize_departure_time")]
    #[validate(custom = "validate_departure_time")]
    pub departure_time: DateTime<Utc>,

    #[validate(range(min = 1, max = 7))]
    pub available_seats: i32,

    #[validate(custom = "validate_price")]
    pub price_per_seat: Decimal,

    #[validate]
    pub vehicle: VehiclePayload,

    pub preferences: Option<serde_json::Value>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_recurring: bool,

    pub recurring_schedule: Option<serde_json::Value>,
}

/// Los timestamps naive se normalizan a UTC
fn deserialize_departure_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime_utc(&raw).map_err(|_| {
        serde::de::Error::custom(format!("invalid departure_time: {}", raw))
    })
}

/// Parámetros de búsqueda de rides (query params en camelCase)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRidesParams {
    #[validate(range(min = -90.0, max = 90.0))]
    pub origin_lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub origin_lng: Option<f64>,

    #[validate(range(min = 1, max = 7))]
    pub min_seats: i32,

    #[validate(range(min = 0.1, max = 50.0))]
    pub proximity_km: f64,

    pub departure_date: Option<NaiveDate>,
}

impl Default for SearchRidesParams {
    fn default() -> Self {
        Self {
            origin_lat: None,
            origin_lng: None,
            min_seats: 1,
            proximity_km: 5.0,
            departure_date: None,
        }
    }
}

/// Response de ride para la API
#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub origin: LocationPayload,
    pub destination: LocationPayload,
    pub departure_time: DateTime<Utc>,
    pub available_seats: i32,
    pub price_per_seat: Decimal,
    pub vehicle: VehiclePayload,
    pub preferences: Option<serde_json::Value>,
    pub status: RideStatus,
    pub is_recurring: bool,
    pub recurring_schedule: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            driver_id: ride.driver_id,
            origin: LocationPayload {
                address: ride.origin_address,
                lat: ride.origin_lat,
                lng: ride.origin_lng,
            },
            destination: LocationPayload {
                address: ride.destination_address,
                lat: ride.destination_lat,
                lng: ride.destination_lng,
            },
            departure_time: ride.departure_time,
            available_seats: ride.available_seats,
            price_per_seat: ride.price_per_seat,
            vehicle: VehiclePayload {
                make: ride.vehicle_make,
                model: ride.vehicle_model,
                year: ride.vehicle_year,
                license_plate: ride.vehicle_license_plate,
                color: ride.vehicle_color,
            },
            preferences: ride.preferences,
            status: ride.status,
            is_recurring: ride.is_recurring,
            recurring_schedule: ride.recurring_schedule,
            notes: ride.notes,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}
