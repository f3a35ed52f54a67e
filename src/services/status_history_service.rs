//! Historial de estados de vehículos
//!
//! Registro de auditoría de solo-añadir. No valida que `previous_status`
//! coincida con el estado real del vehículo: el llamador es responsable.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::database::SharedStore;
use crate::models::status_history::StatusHistoryEntry;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::StatusHistoryRepository;
use crate::utils::clock::Clock;
use crate::utils::errors::AppResult;

pub struct StatusHistoryService {
    repository: StatusHistoryRepository,
    clock: Arc<dyn Clock>,
}

impl StatusHistoryService {
    pub fn new(store: SharedStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: StatusHistoryRepository::new(store),
            clock,
        }
    }

    /// Crear una entrada con id nuevo y la hora actual, y persistir el historial
    pub fn record(
        &self,
        vehicle_id: Uuid,
        previous_status: VehicleStatus,
        new_status: VehicleStatus,
        notes: Option<String>,
        associated_repair_id: Option<Uuid>,
    ) -> AppResult<StatusHistoryEntry> {
        let entry = StatusHistoryEntry::new(
            vehicle_id,
            previous_status,
            new_status,
            self.clock.now(),
            notes,
            associated_repair_id,
        );
        let entry = self.repository.append(entry)?;
        info!(
            "📝 Vehículo {}: {} -> {}",
            vehicle_id, previous_status, new_status
        );
        Ok(entry)
    }

    /// Entradas de un vehículo, la más reciente primero
    pub fn history_for(&self, vehicle_id: Uuid) -> Vec<StatusHistoryEntry> {
        let mut entries: Vec<StatusHistoryEntry> = self
            .repository
            .list()
            .into_iter()
            .filter(|entry| entry.vehicle_id == vehicle_id)
            .collect();
        // sort estable: con la misma marca de tiempo se mantiene el orden de inserción
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    pub fn latest_for(&self, vehicle_id: Uuid) -> Option<StatusHistoryEntry> {
        self.history_for(vehicle_id).into_iter().next()
    }

    /// Solo para el borrado en cascada de un vehículo
    pub(crate) fn purge_vehicle(&self, vehicle_id: Uuid) -> AppResult<usize> {
        let removed = self.repository.delete_by_vehicle(vehicle_id)?;
        debug!("🗑️ {} entradas de historial eliminadas para {}", removed, vehicle_id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::collections::STATUS_HISTORY_KEY;
    use crate::database::{InMemoryStore, KeyValueStore};
    use crate::utils::clock::ManualClock;
    use crate::utils::errors::AppError;
    use chrono::{Duration, TimeZone, Utc};

    fn ledger() -> (StatusHistoryService, SharedStore, Arc<ManualClock>) {
        let store = InMemoryStore::shared();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
        ));
        let service = StatusHistoryService::new(store.clone(), clock.clone());
        (service, store, clock)
    }

    #[test]
    fn test_history_is_newest_first() {
        let (ledger, _store, clock) = ledger();
        let vehicle_id = Uuid::new_v4();

        let e1 = ledger
            .record(vehicle_id, VehicleStatus::Active, VehicleStatus::InRepair, None, None)
            .unwrap();
        clock.advance(Duration::minutes(1));
        let e2 = ledger
            .record(vehicle_id, VehicleStatus::InRepair, VehicleStatus::Repaired, None, None)
            .unwrap();
        clock.advance(Duration::minutes(1));
        let e3 = ledger
            .record(
                vehicle_id,
                VehicleStatus::Repaired,
                VehicleStatus::ReadyForPickup,
                Some("Cliente avisado".to_string()),
                None,
            )
            .unwrap();

        assert_eq!(ledger.history_for(vehicle_id), vec![e3.clone(), e2, e1]);
        assert_eq!(ledger.latest_for(vehicle_id), Some(e3));
    }

    #[test]
    fn test_history_is_isolated_per_vehicle() {
        let (ledger, _store, clock) = ledger();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        ledger
            .record(a, VehicleStatus::Active, VehicleStatus::Maintenance, None, None)
            .unwrap();
        clock.advance(Duration::seconds(1));
        let only_b = ledger
            .record(b, VehicleStatus::Active, VehicleStatus::Inactive, None, None)
            .unwrap();

        assert_eq!(ledger.history_for(b), vec![only_b]);
        assert!(ledger.history_for(a).iter().all(|e| e.vehicle_id == a));
        assert!(ledger.history_for(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_record_keeps_repair_reference_and_drops_blank_notes() {
        let (ledger, _store, _clock) = ledger();
        let repair_id = Uuid::new_v4();

        let entry = ledger
            .record(
                Uuid::new_v4(),
                VehicleStatus::InRepair,
                VehicleStatus::Repaired,
                Some("   ".to_string()),
                Some(repair_id),
            )
            .unwrap();

        assert_eq!(entry.associated_repair_id, Some(repair_id));
        assert_eq!(entry.notes, None);
        assert_eq!(
            entry.timestamp,
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_corrupt_ledger_reads_as_empty() {
        let (ledger, store, _clock) = ledger();
        let vehicle_id = Uuid::new_v4();
        store.set(STATUS_HISTORY_KEY, "{not json").unwrap();

        assert!(ledger.history_for(vehicle_id).is_empty());

        // No se escribe encima de lo que no se pudo leer
        let err = ledger
            .record(vehicle_id, VehicleStatus::Active, VehicleStatus::Inactive, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::CorruptCollection(_)));
        assert_eq!(
            store.get(STATUS_HISTORY_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_unknown_status_code_keeps_the_rest_of_the_ledger() {
        let (ledger, store, _clock) = ledger();
        let vehicle_id = Uuid::new_v4();
        let stored = format!(
            r#"[{{"id":"{}","vehicleId":"{}","previousStatus":"active","newStatus":"sold","timestamp":"2024-03-01T10:00:00Z"}}]"#,
            Uuid::new_v4(),
            vehicle_id
        );
        store.set(STATUS_HISTORY_KEY, &stored).unwrap();

        let entry = ledger
            .record(vehicle_id, VehicleStatus::Active, VehicleStatus::InRepair, None, None)
            .unwrap();

        let history = ledger.history_for(vehicle_id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], entry);
        assert_eq!(history[1].new_status, VehicleStatus::Unknown);
        assert_eq!(history[1].new_status.label(), "Unknown");
    }

    #[test]
    fn test_purge_only_touches_one_vehicle() {
        let (ledger, _store, _clock) = ledger();
        let gone = Uuid::new_v4();
        let kept = Uuid::new_v4();
        ledger
            .record(gone, VehicleStatus::Active, VehicleStatus::InRepair, None, None)
            .unwrap();
        ledger
            .record(kept, VehicleStatus::Active, VehicleStatus::InRepair, None, None)
            .unwrap();

        assert_eq!(ledger.purge_vehicle(gone).unwrap(), 1);
        assert!(ledger.history_for(gone).is_empty());
        assert_eq!(ledger.history_for(kept).len(), 1);
    }
}
