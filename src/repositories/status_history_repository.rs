use uuid::Uuid;

use crate::database::collections::{
    load_collection, load_collection_for_write, save_collection, STATUS_HISTORY_KEY,
};
use crate::database::SharedStore;
use crate::models::status_history::StatusHistoryEntry;
use crate::utils::errors::AppResult;

/// Persistencia del historial de estados (solo se añade; nunca se edita)
pub struct StatusHistoryRepository {
    store: SharedStore,
}

impl StatusHistoryRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<StatusHistoryEntry> {
        load_collection(self.store.as_ref(), STATUS_HISTORY_KEY)
    }

    fn list_for_write(&self) -> AppResult<Vec<StatusHistoryEntry>> {
        load_collection_for_write(self.store.as_ref(), STATUS_HISTORY_KEY)
    }

    pub fn append(&self, entry: StatusHistoryEntry) -> AppResult<StatusHistoryEntry> {
        let mut entries = self.list_for_write()?;
        entries.push(entry.clone());
        save_collection(self.store.as_ref(), STATUS_HISTORY_KEY, &entries)?;
        Ok(entry)
    }

    /// Quitar las entradas de un vehículo borrado
    pub fn delete_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<usize> {
        let entries = self.list_for_write()?;
        let before = entries.len();
        let kept: Vec<StatusHistoryEntry> = entries
            .into_iter()
            .filter(|entry| entry.vehicle_id != vehicle_id)
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            save_collection(self.store.as_ref(), STATUS_HISTORY_KEY, &kept)?;
        }
        Ok(removed)
    }
}
