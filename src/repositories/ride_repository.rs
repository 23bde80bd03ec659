//! Repositorio de rides
//!
//! Frontera de persistencia del servicio. Acá no hay validación de negocio:
//! los guards en los UPDATE existen para serializar mutaciones concurrentes
//! de asientos sobre el mismo ride, no para validar input.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ride::{NewRide, Ride, RideStatus};
use crate::utils::errors::AppResult;

/// Capacidad máxima de asientos de un ride
pub const MAX_SEATS: i32 = 7;

/// Predicado grueso para el conjunto candidato de la búsqueda.
/// El filtrado fino por radio es responsabilidad de la capa de búsqueda.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    pub min_seats: i32,
    pub departure_after: DateTime<Utc>,
    pub departure_date: Option<NaiveDate>,
}

/// Frontera de persistencia de rides.
#[async_trait]
pub trait RideStore: Send + Sync {
    /// Persistir un ride validado. Asigna id y timestamps y fuerza el
    /// estado `active` sin importar lo que traiga el caller.
    async fn create(&self, ride: NewRide) -> AppResult<Ride>;

    /// `None` cuando el id no existe; el caller decide si eso es un 404.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>>;

    /// Conjunto candidato sin ordenar: activos, con asientos suficientes
    /// y salida futura.
    async fn find_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Ride>>;

    /// Descontar un asiento de forma atómica. Si el descuento llega a 0
    /// el estado pasa a `full` en la misma sentencia. `None` si el ride
    /// no existe o el guard (activo, asientos >= 1) no se cumple.
    async fn reserve_seat(&self, id: Uuid) -> AppResult<Option<Ride>>;

    /// Liberar un asiento de forma atómica. Un ride `full` vuelve a
    /// `active`. `None` si no existe o ya está en capacidad máxima
    /// o en estado terminal.
    async fn release_seat(&self, id: Uuid) -> AppResult<Option<Ride>>;

    /// Transición de estado con guard sobre estados no terminales.
    /// `None` si el ride no existe o ya quedó en estado terminal.
    async fn transition_status(&self, id: Uuid, to: RideStatus) -> AppResult<Option<Ride>>;
}

/// Implementación PostgreSQL del repositorio
pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideStore for PgRideRepository {
    async fn create(&self, ride: NewRide) -> AppResult<Ride> {
        let id = Uuid::new_v4();

        let created = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (
                id, driver_id,
                origin_address, origin_lat, origin_lng,
                destination_address, destination_lat, destination_lng,
                departure_time, available_seats, price_per_seat,
                vehicle_make, vehicle_model, vehicle_year, vehicle_license_plate, vehicle_color,
                preferences, status, is_recurring, recurring_schedule, notes,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, 'active'::ride_status, $18, $19, $20,
                NOW(), NOW()
            )
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ride.driver_id)
        .bind(ride.origin_address)
        .bind(ride.origin_lat)
        .bind(ride.origin_lng)
        .bind(ride.destination_address)
        .bind(ride.destination_lat)
        .bind(ride.destination_lng)
        .bind(ride.departure_time)
        .bind(ride.available_seats)
        .bind(ride.price_per_seat)
        .bind(ride.vehicle_make)
        .bind(ride.vehicle_model)
        .bind(ride.vehicle_year)
        .bind(ride.vehicle_license_plate)
        .bind(ride.vehicle_color)
        .bind(ride.preferences)
        .bind(ride.is_recurring)
        .bind(ride.recurring_schedule)
        .bind(ride.notes)
        .fetch_one(&self.pool)
        .await?;

        log::info!("💾 Ride {} persisted for driver {}", created.id, created.driver_id);
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ride)
    }

    async fn find_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Ride>> {
        let rides = if let Some(date) = filter.departure_date {
            let day_start = date.and_time(NaiveTime::MIN).and_utc();
            let day_end = day_start + chrono::Duration::days(1);

            sqlx::query_as::<_, Ride>(
                r#"
                SELECT * FROM rides
                WHERE status = 'active'::ride_status
                  AND available_seats >= $1
                  AND departure_time >= $2
                  AND departure_time >= $3
                  AND departure_time < $4
                "#,
            )
            .bind(filter.min_seats)
            .bind(filter.departure_after)
            .bind(day_start)
            .bind(day_end)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Ride>(
                r#"
                SELECT * FROM rides
                WHERE status = 'active'::ride_status
                  AND available_seats >= $1
                  AND departure_time >= $2
                "#,
            )
            .bind(filter.min_seats)
            .bind(filter.departure_after)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rides)
    }

    async fn reserve_seat(&self, id: Uuid) -> AppResult<Option<Ride>> {
        // Sentencia única: dos bookings concurrentes sobre el mismo ride
        // se serializan en la fila y el perdedor no cumple el guard.
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET available_seats = available_seats - 1,
                status = CASE
                    WHEN available_seats - 1 = 0 THEN 'full'::ride_status
                    ELSE status
                END,
                updated_at = NOW()
            WHERE id = $1
              AND status = 'active'::ride_status
              AND available_seats >= 1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ride)
    }

    async fn release_seat(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET available_seats = available_seats + 1,
                status = CASE
                    WHEN status = 'full'::ride_status THEN 'active'::ride_status
                    ELSE status
                END,
                updated_at = NOW()
            WHERE id = $1
              AND status IN ('active'::ride_status, 'full'::ride_status)
              AND available_seats < $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(MAX_SEATS)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ride)
    }

    async fn transition_status(&self, id: Uuid, to: RideStatus) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET status = $2, updated_at = NOW()
            WHERE id = $1
              AND status IN ('active'::ride_status, 'full'::ride_status)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ride)
    }
}
