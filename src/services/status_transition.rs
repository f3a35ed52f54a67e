//! Reglas de transición de estados
//!
//! El grafo se valida aquí, en la frontera de mutación, para todos los
//! caminos que cambian un estado (formulario de estado, completar una
//! reparación). `repaired` y `ready_for_pickup` forman un par terminal.

use crate::models::repair::{RepairService, RepairStatus, UpdateRepairRequest};
use crate::models::vehicle::VehicleStatus;
use crate::utils::errors::{forbidden_error, invalid_transition_error, AppResult};

/// Destinos permitidos desde `from`, sin contar la transición a sí mismo
pub fn vehicle_transitions(from: VehicleStatus) -> &'static [VehicleStatus] {
    use VehicleStatus::*;

    match from {
        Active => &[Inactive, Maintenance, InRepair, Repaired],
        Inactive => &[Active, Maintenance, InRepair],
        Maintenance => &[Active, Inactive, InRepair, Repaired],
        InRepair => &[Maintenance, Repaired, ReadyForPickup],
        Repaired => &[ReadyForPickup],
        ReadyForPickup => &[Repaired],
        // Un código desconocido puede reconducirse a cualquier estado conocido
        Unknown => &[Active, Inactive, Maintenance, InRepair, Repaired, ReadyForPickup],
    }
}

/// Repetir el estado actual siempre está permitido (se registra igual)
pub fn can_transition_vehicle(from: VehicleStatus, to: VehicleStatus) -> bool {
    if to == VehicleStatus::Unknown {
        return false;
    }
    from == to || vehicle_transitions(from).contains(&to)
}

pub fn ensure_vehicle_transition(from: VehicleStatus, to: VehicleStatus) -> AppResult<()> {
    if can_transition_vehicle(from, to) {
        Ok(())
    } else {
        Err(invalid_transition_error("Vehicle", from.as_str(), to.as_str()))
    }
}

/// Destinos permitidos para una reparación; `completed` no tiene salida
pub fn repair_transitions(from: RepairStatus) -> &'static [RepairStatus] {
    use RepairStatus::*;

    match from {
        Pending => &[InProgress, Completed, Cancelled],
        InProgress => &[Pending, Completed, Cancelled],
        Cancelled => &[Pending],
        Unknown => &[Pending, Cancelled],
        Completed => &[],
    }
}

pub fn can_transition_repair(from: RepairStatus, to: RepairStatus) -> bool {
    if from == RepairStatus::Completed || to == RepairStatus::Unknown {
        return false;
    }
    from == to || repair_transitions(from).contains(&to)
}

pub fn ensure_repair_transition(from: RepairStatus, to: RepairStatus) -> AppResult<()> {
    if can_transition_repair(from, to) {
        Ok(())
    } else {
        Err(invalid_transition_error("Repair", from.as_str(), to.as_str()))
    }
}

/// Una reparación completada solo acepta cambios en notas e imágenes
pub fn ensure_repair_editable(repair: &RepairService, request: &UpdateRepairRequest) -> AppResult<()> {
    if !repair.is_completed() {
        return Ok(());
    }
    let locked = request.locked_fields();
    if locked.is_empty() {
        Ok(())
    } else {
        Err(forbidden_error(
            "update completed repair",
            &format!("only notes and images are editable (got {})", locked.join(", ")),
        ))
    }
}
