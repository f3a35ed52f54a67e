//! Repositorios
//!
//! Un repositorio por colección, todos sobre el mismo `SharedStore`.

pub mod activity_log_repository;
pub mod part_repository;
pub mod repair_repository;
pub mod status_history_repository;
pub mod vehicle_repository;

pub use activity_log_repository::ActivityLogRepository;
pub use part_repository::PartRepository;
pub use repair_repository::RepairRepository;
pub use status_history_repository::StatusHistoryRepository;
pub use vehicle_repository::VehicleRepository;
