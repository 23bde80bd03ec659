//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para las validaciones que el
//! derive de `validator` no puede expresar: normalización de timestamps,
//! regla de salida futura y precisión decimal del precio.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Precio máximo por asiento
const MAX_PRICE_PER_SEAT: &str = "999.99";

/// Antelación mínima de salida respecto a la hora de publicación
const MIN_DEPARTURE_LEAD_HOURS: i64 = 1;

/// Parsear un timestamp RFC3339 (con offset) o naive (asumido UTC).
/// Los timestamps naive se normalizan a UTC.
pub fn parse_datetime_utc(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339 o YYYY-MM-DDTHH:MM:SS".to_string());
            error
        })
}

/// Validar que la salida sea al menos 1 hora en el futuro
pub fn validate_departure_time(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    let min_time = Utc::now() + Duration::hours(MIN_DEPARTURE_LEAD_HOURS);
    if *value < min_time {
        let mut error = ValidationError::new("departure_time");
        error.add_param(
            "message".into(),
            &"Departure time must be at least 1 hour in the future".to_string(),
        );
        return Err(error);
    }
    Ok(())
}

/// Validar precio por asiento: rango [0, 999.99] con máximo 2 decimales
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    let max: Decimal = MAX_PRICE_PER_SEAT.parse().unwrap_or_default();

    if *value < Decimal::ZERO || *value > max {
        let mut error = ValidationError::new("price_per_seat");
        error.add_param("min".into(), &"0");
        error.add_param("max".into(), &MAX_PRICE_PER_SEAT);
        return Err(error);
    }

    if value.normalize().scale() > 2 {
        let mut error = ValidationError::new("price_per_seat");
        error.add_param("message".into(), &"At most 2 decimal places allowed".to_string());
        return Err(error);
    }

    Ok(())
}
