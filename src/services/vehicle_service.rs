//! Servicio de vehículos
//!
//! Orquesta repositorio, historial de estados, registro de actividad y el
//! evaluador de mantenimiento.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::activity_log_service::ActivityLogService;
use super::service_due::{ServiceDueEvaluator, ServiceDueSummary};
use super::status_history_service::StatusHistoryService;
use super::status_transition::ensure_vehicle_transition;
use crate::database::SharedStore;
use crate::models::activity_log::ActivityEntity;
use crate::models::repair::RepairStatus;
use crate::models::status_history::StatusHistoryEntry;
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters, VehicleStatus,
};
use crate::repositories::{RepairRepository, VehicleRepository};
use crate::utils::clock::Clock;
use crate::utils::errors::{conflict_error, AppResult};

/// Línea del informe de mantenimiento
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleServiceReport {
    pub vehicle_id: Uuid,
    pub display_name: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub status_label: String,
    pub status_style: &'static str,
    pub service: ServiceDueSummary,
}

/// Pérdidas y ganancias de un vehículo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFinancials {
    pub purchase_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    /// Coste de las reparaciones completadas
    pub repair_costs: Decimal,
    pub total_investment: Option<Decimal>,
    pub profit_loss: Option<Decimal>,
}

/// Resultado de un borrado en cascada
#[derive(Debug, Clone)]
pub struct DeletedVehicle {
    pub vehicle: Vehicle,
    pub repairs_removed: usize,
    pub history_removed: usize,
}

pub struct VehicleService {
    vehicles: VehicleRepository,
    repairs: RepairRepository,
    history: StatusHistoryService,
    activity: ActivityLogService,
    evaluator: ServiceDueEvaluator,
    clock: Arc<dyn Clock>,
    actor: String,
}

impl VehicleService {
    pub fn new(
        store: SharedStore,
        clock: Arc<dyn Clock>,
        evaluator: ServiceDueEvaluator,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            vehicles: VehicleRepository::new(store.clone()),
            repairs: RepairRepository::new(store.clone()),
            history: StatusHistoryService::new(store.clone(), clock.clone()),
            activity: ActivityLogService::new(store, clock.clone()),
            evaluator,
            clock,
            actor: actor.into(),
        }
    }

    pub fn create_vehicle(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .create(Vehicle::from_request(request, self.clock.now()))?;

        info!("🚗 Vehículo creado: {} ({})", vehicle.display_name(), vehicle.id);
        self.activity.log(
            &self.actor,
            "vehicle.created",
            Some(ActivityEntity::Vehicle(vehicle.id)),
            Some(vehicle.display_name()),
        )?;
        Ok(vehicle)
    }

    pub fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles.get(id)
    }

    pub fn list_vehicles(&self, filters: &VehicleFilters) -> Vec<Vehicle> {
        self.vehicles.search(filters)
    }

    /// Editar datos del vehículo. El estado solo cambia con `change_status`.
    pub fn update_vehicle(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let mut vehicle = self.vehicles.get(id)?;
        if let Some(vin) = &request.vin {
            if self.vehicles.vin_exists(vin, Some(id)) {
                return Err(conflict_error("Vehicle", "vin", vin));
            }
        }

        vehicle.apply_update(request, self.clock.now());
        let vehicle = self.vehicles.update(vehicle)?;

        self.activity.log(
            &self.actor,
            "vehicle.updated",
            Some(ActivityEntity::Vehicle(id)),
            None,
        )?;
        Ok(vehicle)
    }

    /// Cambiar el estado validando la transición y dejando constancia en el historial
    pub fn change_status(
        &self,
        id: Uuid,
        new_status: VehicleStatus,
        notes: Option<String>,
    ) -> AppResult<(Vehicle, StatusHistoryEntry)> {
        let mut vehicle = self.vehicles.get(id)?;
        let previous_status = vehicle.status;
        ensure_vehicle_transition(previous_status, new_status)?;

        vehicle.status = new_status;
        vehicle.last_updated = self.clock.now();
        let vehicle = self.vehicles.update(vehicle)?;

        let entry = self
            .history
            .record(id, previous_status, new_status, notes, None)?;
        self.activity.log(
            &self.actor,
            "vehicle.status_changed",
            Some(ActivityEntity::Vehicle(id)),
            Some(format!("{} -> {}", previous_status.label(), new_status.label())),
        )?;

        Ok((vehicle, entry))
    }

    /// Borrar un vehículo junto con sus reparaciones y su historial
    pub fn delete_vehicle(&self, id: Uuid) -> AppResult<DeletedVehicle> {
        let vehicle = self.vehicles.delete(id)?;
        let repairs_removed = self.repairs.delete_by_vehicle(id)?;
        let history_removed = self.history.purge_vehicle(id)?;

        info!(
            "🗑️ Vehículo {} eliminado ({} reparaciones, {} entradas de historial)",
            id, repairs_removed, history_removed
        );
        self.activity.log(
            &self.actor,
            "vehicle.deleted",
            Some(ActivityEntity::Vehicle(id)),
            Some(vehicle.display_name()),
        )?;

        Ok(DeletedVehicle {
            vehicle,
            repairs_removed,
            history_removed,
        })
    }

    pub fn status_history(&self, id: Uuid) -> Vec<StatusHistoryEntry> {
        self.history.history_for(id)
    }

    pub fn service_summary(&self, id: Uuid) -> AppResult<ServiceDueSummary> {
        let vehicle = self.vehicles.get(id)?;
        Ok(self.evaluator.summary_at(&vehicle, self.clock.now()))
    }

    pub fn vehicles_due_for_service(&self) -> Vec<Vehicle> {
        let now = self.clock.now();
        self.vehicles
            .list()
            .into_iter()
            .filter(|vehicle| self.evaluator.is_service_due_at(vehicle, now))
            .collect()
    }

    /// Informe de mantenimiento de toda la flota, vencidos primero
    pub fn service_report(&self) -> Vec<VehicleServiceReport> {
        let now = self.clock.now();
        let mut report: Vec<VehicleServiceReport> = self
            .vehicles
            .list()
            .into_iter()
            .map(|vehicle| VehicleServiceReport {
                vehicle_id: vehicle.id,
                display_name: vehicle.display_name(),
                status: vehicle.status,
                status_label: vehicle.status.label(),
                status_style: vehicle.status.style(),
                service: self.evaluator.summary_at(&vehicle, now),
                license_plate: vehicle.license_plate,
            })
            .collect();

        report.sort_by(|a, b| {
            b.service
                .is_due
                .cmp(&a.service.is_due)
                .then(a.service.days_until_due.cmp(&b.service.days_until_due))
        });
        report
    }

    /// Valor de mercado menos (precio de compra + reparaciones completadas)
    pub fn financials(&self, id: Uuid) -> AppResult<VehicleFinancials> {
        let vehicle = self.vehicles.get(id)?;
        let repair_costs: Decimal = self
            .repairs
            .find_by_vehicle(id)
            .iter()
            .filter(|repair| repair.status == RepairStatus::Completed)
            .map(|repair| repair.cost)
            .sum();

        let total_investment = vehicle.purchase_price.map(|price| price + repair_costs);
        let profit_loss = match (vehicle.market_value, total_investment) {
            (Some(value), Some(investment)) => Some(value - investment),
            _ => None,
        };

        Ok(VehicleFinancials {
            purchase_price: vehicle.purchase_price,
            market_value: vehicle.market_value,
            repair_costs,
            total_investment,
            profit_loss,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::collections::VEHICLES_KEY;
    use crate::database::{InMemoryStore, KeyValueStore};
    use crate::models::vehicle::VehicleType;
    use crate::utils::clock::ManualClock;
    use crate::utils::errors::AppError;
    use chrono::{TimeZone, Utc};

    fn service() -> VehicleService {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        ));
        VehicleService::new(
            InMemoryStore::shared(),
            clock,
            ServiceDueEvaluator::default(),
            "tester",
        )
    }

    fn request(vin: &str) -> CreateVehicleRequest {
        CreateVehicleRequest {
            make: "Seat".to_string(),
            model: "Ibiza".to_string(),
            year: 2018,
            vin: vin.to_string(),
            license_plate: "1234-BCD".to_string(),
            vehicle_type: None,
            mileage: 60_000,
            last_service_date: Some("2024-05-20".to_string()),
            last_service_mileage: Some(58_000),
            service_interval: None,
            distance_interval: None,
            purchase_price: Some(Decimal::new(800_000, 2)),
            market_value: Some(Decimal::new(950_000, 2)),
        }
    }

    #[test]
    fn test_create_rejects_invalid_and_duplicate_vins() {
        let service = service();
        service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap();

        let err = service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service.create_vehicle(request("bad")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_change_status_records_history() {
        let service = service();
        let vehicle = service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap();

        let (updated, entry) = service
            .change_status(vehicle.id, VehicleStatus::InRepair, Some("Ruido en frenos".to_string()))
            .unwrap();

        assert_eq!(updated.status, VehicleStatus::InRepair);
        assert_eq!(entry.previous_status, VehicleStatus::Active);
        assert_eq!(entry.new_status, VehicleStatus::InRepair);
        assert_eq!(service.status_history(vehicle.id), vec![entry]);
    }

    #[test]
    fn test_change_status_rejects_leaving_completed_pair() {
        let service = service();
        let vehicle = service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap();
        service
            .change_status(vehicle.id, VehicleStatus::Repaired, None)
            .unwrap();

        let err = service
            .change_status(vehicle.id, VehicleStatus::Active, None)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        // El rechazo no deja rastro
        assert_eq!(service.status_history(vehicle.id).len(), 1);
        assert_eq!(
            service.get_vehicle(vehicle.id).unwrap().status,
            VehicleStatus::Repaired
        );
    }

    #[test]
    fn test_unknown_codes_do_not_wipe_the_fleet() {
        let store = InMemoryStore::shared();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        ));
        let service = VehicleService::new(
            store.clone(),
            clock,
            ServiceDueEvaluator::default(),
            "tester",
        );
        store
            .set(
                VEHICLES_KEY,
                r#"[
                    {"id":"550e8400-e29b-41d4-a716-446655440001","make":"Ford","model":"Focus","year":2015,
                     "vin":"1FADP3F20FL123456","licensePlate":"FRD-001","type":"car","mileage":90000,
                     "status":"active","lastUpdated":"2024-05-01T10:00:00Z"},
                    {"id":"550e8400-e29b-41d4-a716-446655440002","make":"Kia","model":"Ceed","year":2019,
                     "vin":"U5YHN516AKL123456","licensePlate":"KIA-002","type":"bus","mileage":30000,
                     "status":"sold","lastUpdated":"2024-05-02T10:00:00Z"}
                ]"#,
            )
            .unwrap();

        let listed = service.list_vehicles(&VehicleFilters::default());
        assert_eq!(listed.len(), 2);
        let kia = listed.iter().find(|v| v.make == "Kia").unwrap();
        assert_eq!(kia.status, VehicleStatus::Unknown);
        assert_eq!(kia.vehicle_type, VehicleType::Unknown);

        service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap();

        let makes: Vec<String> = service
            .list_vehicles(&VehicleFilters::default())
            .into_iter()
            .map(|v| v.make)
            .collect();
        assert_eq!(makes.len(), 3);
        assert!(makes.contains(&"Ford".to_string()));
        assert!(makes.contains(&"Kia".to_string()));

        // Un estado desconocido se puede reconducir, pero nunca se asigna
        let kia_id = kia.id;
        let (moved, _) = service
            .change_status(kia_id, VehicleStatus::Inactive, None)
            .unwrap();
        assert_eq!(moved.status, VehicleStatus::Inactive);
        assert!(service
            .change_status(kia_id, VehicleStatus::Unknown, None)
            .is_err());
    }

    #[test]
    fn test_unparseable_fleet_is_not_overwritten() {
        let store = InMemoryStore::shared();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        ));
        let service = VehicleService::new(
            store.clone(),
            clock,
            ServiceDueEvaluator::default(),
            "tester",
        );
        store.set(VEHICLES_KEY, "[{\"id\": ").unwrap();

        let err = service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap_err();
        assert!(matches!(err, AppError::CorruptCollection(_)));
        assert_eq!(store.get(VEHICLES_KEY).unwrap().as_deref(), Some("[{\"id\": "));
    }

    #[test]
    fn test_financials() {
        let service = service();
        let vehicle = service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap();

        let financials = service.financials(vehicle.id).unwrap();
        assert_eq!(financials.repair_costs, Decimal::ZERO);
        assert_eq!(financials.total_investment, Some(Decimal::new(800_000, 2)));
        assert_eq!(financials.profit_loss, Some(Decimal::new(150_000, 2)));

        let mut no_price = request("VSSZZZ6JZJR654321");
        no_price.market_value = None;
        let other = service.create_vehicle(no_price).unwrap();
        assert_eq!(service.financials(other.id).unwrap().profit_loss, None);
    }

    #[test]
    fn test_service_report_puts_due_vehicles_first() {
        let service = service();
        let fresh = service.create_vehicle(request("VSSZZZ6JZJR123456")).unwrap();
        let mut never = request("VSSZZZ6JZJR654321");
        never.last_service_date = None;
        let never = service.create_vehicle(never).unwrap();

        let report = service.service_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].vehicle_id, never.id);
        assert!(report[0].service.is_due);
        assert_eq!(report[1].vehicle_id, fresh.id);
        // 2024-05-20 + 90 días = 2024-08-18; desde 2024-06-01 10:00 quedan 77 días y 14 horas
        assert_eq!(report[1].service.days_until_due, Some(78));
        assert_eq!(report[1].status_label, "Active");

        let due: Vec<Uuid> = service.vehicles_due_for_service().iter().map(|v| v.id).collect();
        assert_eq!(due, vec![never.id]);
    }
}
