//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que se guardan en las
//! colecciones JSON del almacén.

pub mod activity_log;
pub mod part;
pub mod repair;
pub mod status_history;
pub mod vehicle;

pub use activity_log::{ActivityEntity, ActivityLog};
pub use part::{CreatePartRequest, Part};
pub use repair::{CreateRepairRequest, RepairService, RepairStatus, UpdateRepairRequest};
pub use status_history::StatusHistoryEntry;
pub use vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters, VehicleStatus, VehicleType,
};
