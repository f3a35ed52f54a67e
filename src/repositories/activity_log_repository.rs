use crate::database::collections::{
    load_collection, load_collection_for_write, save_collection, ACTIVITY_LOGS_KEY,
};
use crate::database::SharedStore;
use crate::models::activity_log::ActivityLog;
use crate::utils::errors::AppResult;

pub struct ActivityLogRepository {
    store: SharedStore,
}

impl ActivityLogRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<ActivityLog> {
        load_collection(self.store.as_ref(), ACTIVITY_LOGS_KEY)
    }

    fn list_for_write(&self) -> AppResult<Vec<ActivityLog>> {
        load_collection_for_write(self.store.as_ref(), ACTIVITY_LOGS_KEY)
    }

    pub fn append(&self, entry: ActivityLog) -> AppResult<ActivityLog> {
        let mut entries = self.list_for_write()?;
        entries.push(entry.clone());
        save_collection(self.store.as_ref(), ACTIVITY_LOGS_KEY, &entries)?;
        Ok(entry)
    }
}
