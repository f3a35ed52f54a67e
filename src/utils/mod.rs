//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y el reloj inyectable que usan los servicios.

pub mod clock;
pub mod errors;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use errors::{AppError, AppResult};
