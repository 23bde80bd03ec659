//! Repositorios de persistencia
//!
//! Este módulo contiene la frontera de acceso a datos del servicio.

pub mod ride_repository;

pub use ride_repository::{CandidateFilter, PgRideRepository, RideStore};
