//! Controllers del sistema
//!
//! Este módulo contiene la capa de orquestación entre las rutas HTTP,
//! los repositorios y los clientes externos.

pub mod ride_controller;

pub use ride_controller::RideController;
