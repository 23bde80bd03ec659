//! Utilidades geoespaciales
//!
//! Este módulo contiene el cálculo de distancia de gran círculo (haversine)
//! usado para el filtrado por proximidad en la búsqueda de rides.

/// Radio de la Tierra en kilómetros
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia de gran círculo entre dos puntos (lat/lng en grados).
/// Retorna la distancia en kilómetros.
pub fn haversine_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlng = (dlng * 0.5).sin();

    let a = sin_dlat * sin_dlat + lat1_rad.cos() * lat2_rad.cos() * sin_dlng * sin_dlng;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Verifica si un punto está dentro de un radio (inclusivo) de un centro.
pub fn is_within_radius(
    point_lat: f64,
    point_lng: f64,
    center_lat: f64,
    center_lng: f64,
    radius_km: f64,
) -> bool {
    haversine_distance_km(point_lat, point_lng, center_lat, center_lng) <= radius_km
}
