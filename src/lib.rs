//! Núcleo de gestión de un taller de vehículos: vehículos, reparaciones,
//! repuestos, historial de estados y evaluación de mantenimiento pendiente,
//! persistidos como colecciones JSON en un almacén clave-valor inyectable.

pub mod config;
pub mod database;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
