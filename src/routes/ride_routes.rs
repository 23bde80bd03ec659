//! Rutas de rides
//!
//! Handlers HTTP de publicación, búsqueda y ciclo de vida. Toda la lógica
//! vive en el controller; acá solo se traduce entre HTTP y el dominio.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::ride_dto::{CreateRideRequest, RideResponse, SearchRidesParams};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ride_router() -> Router<AppState> {
    Router::new()
        .route("/", post(publish_ride).get(search_rides))
        .route("/:id", get(get_ride))
        .route("/:id/book", post(book_seat))
        .route("/:id/book/cancel", post(cancel_booking))
        .route("/:id/cancel", post(cancel_ride))
        .route("/:id/complete", post(complete_ride))
}

async fn publish_ride(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateRideRequest>,
) -> Result<(StatusCode, Json<RideResponse>), AppError> {
    let ride = state.rides.publish(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(ride.into())))
}

async fn search_rides(
    State(state): State<AppState>,
    Query(params): Query<SearchRidesParams>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    let rides = state.rides.search(params).await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

async fn get_ride(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.rides.get_by_id(id).await?;
    Ok(Json(ride.into()))
}

async fn book_seat(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.rides.book_seat(id).await?;
    Ok(Json(ride.into()))
}

async fn cancel_booking(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.rides.cancel_booking(id).await?;
    Ok(Json(ride.into()))
}

async fn cancel_ride(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.rides.cancel(id, user.user_id).await?;
    Ok(Json(ride.into()))
}

async fn complete_ride(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.rides.complete(id, user.user_id).await?;
    Ok(Json(ride.into()))
}
