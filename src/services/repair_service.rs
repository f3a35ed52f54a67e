//! Servicio de órdenes de reparación

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::activity_log_service::ActivityLogService;
use super::status_history_service::StatusHistoryService;
use super::status_transition::{
    ensure_repair_editable, ensure_repair_transition, ensure_vehicle_transition,
};
use crate::database::SharedStore;
use crate::models::activity_log::ActivityEntity;
use crate::models::repair::{CreateRepairRequest, RepairService, RepairStatus, UpdateRepairRequest};
use crate::models::status_history::StatusHistoryEntry;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::{RepairRepository, VehicleRepository};
use crate::utils::clock::Clock;
use crate::utils::errors::{internal_error, AppResult};
use crate::utils::validation::parse_service_date;

/// Lo que cambia al completar una reparación
#[derive(Debug, Clone)]
pub struct RepairCompletion {
    pub repair: RepairService,
    pub vehicle: Vehicle,
    pub history_entry: StatusHistoryEntry,
}

pub struct RepairTicketService {
    repairs: RepairRepository,
    vehicles: VehicleRepository,
    history: StatusHistoryService,
    activity: ActivityLogService,
    clock: Arc<dyn Clock>,
    actor: String,
}

impl RepairTicketService {
    pub fn new(store: SharedStore, clock: Arc<dyn Clock>, actor: impl Into<String>) -> Self {
        Self {
            repairs: RepairRepository::new(store.clone()),
            vehicles: VehicleRepository::new(store.clone()),
            history: StatusHistoryService::new(store.clone(), clock.clone()),
            activity: ActivityLogService::new(store, clock.clone()),
            clock,
            actor: actor.into(),
        }
    }

    /// Abrir una reparación `pending` sobre un vehículo existente
    pub fn create_repair(&self, request: CreateRepairRequest) -> AppResult<RepairService> {
        request.validate()?;
        let vehicle = self.vehicles.get(request.vehicle_id)?;
        let service_date = parse_date(&request.service_date)?;
        let now = self.clock.now();

        let repair = RepairService {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            description: request.description.trim().to_string(),
            service_date,
            technician: request.technician.trim().to_string(),
            labor_hours: request.labor_hours,
            cost: request.cost,
            status: RepairStatus::Pending,
            parts: request.parts,
            notes: request.notes.unwrap_or_default(),
            images: request.images,
            created_at: now,
            updated_at: now,
        };
        let repair = self.repairs.create(repair)?;

        info!("🔧 Reparación {} abierta para {}", repair.id, vehicle.display_name());
        self.activity.log(
            &self.actor,
            "repair.created",
            Some(ActivityEntity::Repair(repair.id)),
            Some(repair.description.clone()),
        )?;
        Ok(repair)
    }

    pub fn get_repair(&self, id: Uuid) -> AppResult<RepairService> {
        self.repairs.get(id)
    }

    pub fn repairs_for_vehicle(&self, vehicle_id: Uuid) -> Vec<RepairService> {
        self.repairs.find_by_vehicle(vehicle_id)
    }

    /// Editar una reparación; completada solo admite notas e imágenes
    pub fn update_repair(&self, id: Uuid, request: UpdateRepairRequest) -> AppResult<RepairService> {
        request.validate()?;
        let mut repair = self.repairs.get(id)?;
        ensure_repair_editable(&repair, &request)?;

        if let Some(description) = request.description {
            repair.description = description.trim().to_string();
        }
        if let Some(date) = request.service_date {
            repair.service_date = parse_date(&date)?;
        }
        if let Some(technician) = request.technician {
            repair.technician = technician.trim().to_string();
        }
        if let Some(hours) = request.labor_hours {
            repair.labor_hours = hours;
        }
        if let Some(cost) = request.cost {
            repair.cost = cost;
        }
        if let Some(parts) = request.parts {
            repair.parts = parts;
        }
        if let Some(notes) = request.notes {
            repair.notes = notes;
        }
        if let Some(images) = request.images {
            repair.images = images;
        }
        repair.updated_at = self.clock.now();

        let repair = self.repairs.update(repair)?;
        self.activity.log(
            &self.actor,
            "repair.updated",
            Some(ActivityEntity::Repair(id)),
            None,
        )?;
        Ok(repair)
    }

    /// Cambiar el estado de la reparación. Pasar a `completed` equivale a
    /// `complete_repair` sin notas.
    pub fn set_status(&self, id: Uuid, status: RepairStatus) -> AppResult<RepairService> {
        if status == RepairStatus::Completed {
            return self.complete_repair(id, None).map(|completion| completion.repair);
        }

        let mut repair = self.repairs.get(id)?;
        ensure_repair_transition(repair.status, status)?;
        let previous = repair.status;
        repair.status = status;
        repair.updated_at = self.clock.now();

        let repair = self.repairs.update(repair)?;
        self.activity.log(
            &self.actor,
            "repair.status_changed",
            Some(ActivityEntity::Repair(id)),
            Some(format!("{} -> {}", previous.label(), status.label())),
        )?;
        Ok(repair)
    }

    /// Completar la reparación: el vehículo pasa a `repaired`, su último
    /// servicio pasa a ser esta reparación y el historial guarda la referencia.
    pub fn complete_repair(&self, id: Uuid, notes: Option<String>) -> AppResult<RepairCompletion> {
        let mut repair = self.repairs.get(id)?;
        let mut vehicle = self.vehicles.get(repair.vehicle_id)?;
        ensure_repair_transition(repair.status, RepairStatus::Completed)?;
        ensure_vehicle_transition(vehicle.status, VehicleStatus::Repaired)?;

        let now = self.clock.now();
        repair.status = RepairStatus::Completed;
        repair.updated_at = now;

        let previous_status = vehicle.status;
        vehicle.status = VehicleStatus::Repaired;
        vehicle.last_service_date = Some(repair.service_date.format("%Y-%m-%d").to_string());
        vehicle.last_service_mileage = Some(vehicle.mileage);
        vehicle.last_updated = now;

        // La reparación se guarda la última: una vez completada queda bloqueada
        let vehicle = self.vehicles.update(vehicle)?;
        let notes = notes.or_else(|| Some(format!("Repair completed: {}", repair.description)));
        let history_entry = self.history.record(
            vehicle.id,
            previous_status,
            VehicleStatus::Repaired,
            notes,
            Some(repair.id),
        )?;
        let repair = self.repairs.update(repair)?;

        info!("✅ Reparación {} completada; vehículo {} reparado", repair.id, vehicle.id);
        self.activity.log(
            &self.actor,
            "repair.completed",
            Some(ActivityEntity::Repair(repair.id)),
            Some(vehicle.display_name()),
        )?;

        Ok(RepairCompletion {
            repair,
            vehicle,
            history_entry,
        })
    }
}

// El request ya pasó por `validate`, así que un fallo aquí es un error interno
fn parse_date(value: &str) -> AppResult<chrono::NaiveDate> {
    parse_service_date(value).map_err(|_| internal_error(&format!("unparseable service date '{}'", value)))
}
