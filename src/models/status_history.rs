//! Entrada del historial de estados de un vehículo
//!
//! Registro inmutable: una vez creado no se modifica. Referencia al vehículo
//! (y opcionalmente a la reparación) solo por id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vehicle::VehicleStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub previous_status: VehicleStatus,
    pub new_status: VehicleStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_repair_id: Option<Uuid>,
}

impl StatusHistoryEntry {
    pub fn new(
        vehicle_id: Uuid,
        previous_status: VehicleStatus,
        new_status: VehicleStatus,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
        associated_repair_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            previous_status,
            new_status,
            timestamp,
            // Notas en blanco no aportan nada al historial
            notes: notes.filter(|n| !n.trim().is_empty()),
            associated_repair_id,
        }
    }

    pub fn is_status_change(&self) -> bool {
        self.previous_status != self.new_status
    }
}
