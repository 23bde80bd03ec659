//! Clients - HTTP clients para servicios externos
//!
//! Este módulo contiene los clientes HTTP para comunicarse con otros
//! servicios del sistema.

pub mod identity_client;

pub use identity_client::{DriverProfile, HttpIdentityClient, IdentityResolver};
