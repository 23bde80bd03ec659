//! Modelo de Ride
//!
//! Este módulo contiene el struct Ride, su ciclo de vida de estados y el
//! struct NewRide usado al persistir. Mapea exactamente al schema PostgreSQL
//! de `migrations/001_create_rides.sql`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del ride - mapea al ENUM ride_status
///
/// Transiciones válidas:
///   active -> full | completed | cancelled
///   full   -> active | completed | cancelled
/// `completed` y `cancelled` son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ride_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Active,
    Full,
    Completed,
    Cancelled,
}

impl RideStatus {
    /// Verificar si el estado es terminal (no admite más transiciones)
    pub fn is_terminal(self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }

    /// Verificar si la transición `self -> next` es válida
    pub fn can_transition_to(self, next: RideStatus) -> bool {
        use RideStatus::*;
        matches!(
            (self, next),
            (Active, Full)
                | (Active, Completed)
                | (Active, Cancelled)
                | (Full, Active)
                | (Full, Completed)
                | (Full, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RideStatus::Active => "active",
            RideStatus::Full => "full",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }
}

/// Ride principal - mapea exactamente a la tabla rides.
/// Las ubicaciones y el vehículo van aplanados en columnas; la capa de DTO
/// los vuelve a armar como objetos anidados para la API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub id: Uuid,
    pub driver_id: Uuid,

    pub origin_address: String,
    pub origin_lat: f64,
    pub origin_lng: f64,

    pub destination_address: String,
    pub destination_lat: f64,
    pub destination_lng: f64,

    pub departure_time: DateTime<Utc>,
    pub available_seats: i32,
    pub price_per_seat: Decimal,

    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_license_plate: String,
    pub vehicle_color: Option<String>,

    pub preferences: Option<serde_json::Value>,
    pub status: RideStatus,
    pub is_recurring: bool,
    pub recurring_schedule: Option<serde_json::Value>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos de un ride ya validado, listo para persistir.
/// No lleva id, estado ni timestamps: el repositorio asigna el id, fuerza
/// el estado `active` y deja los timestamps al servidor.
#[derive(Debug, Clone)]
pub struct NewRide {
    pub driver_id: Uuid,

    pub origin_address: String,
    pub origin_lat: f64,
    pub origin_lng: f64,

    pub destination_address: String,
    pub destination_lat: f64,
    pub destination_lng: f64,

    pub departure_time: DateTime<Utc>,
    pub available_seats: i32,
    pub price_per_seat: Decimal,

    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_license_plate: String,
    pub vehicle_color: Option<String>,

    pub preferences: Option<serde_json::Value>,
    pub is_recurring: bool,
    pub recurring_schedule: Option<serde_json::Value>,
    pub notes: Option<String>,
}
