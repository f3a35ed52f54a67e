//! Services module
//!
//! Este módulo contiene la lógica de negocio del taller. Los servicios
//! encapsulan operaciones que pueden involucrar varios modelos.

pub mod activity_log_service;
pub mod inventory_service;
pub mod repair_service;
pub mod service_due;
pub mod status_display;
pub mod status_history_service;
pub mod status_transition;
pub mod vehicle_service;

pub use activity_log_service::ActivityLogService;
pub use inventory_service::InventoryService;
pub use repair_service::{RepairCompletion, RepairTicketService};
pub use service_due::{ServiceDueEvaluator, ServiceDueSummary, ServicePolicy};
pub use status_history_service::StatusHistoryService;
pub use vehicle_service::{DeletedVehicle, VehicleFinancials, VehicleService, VehicleServiceReport};
