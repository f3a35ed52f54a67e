//! Registro de actividad del taller

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::database::SharedStore;
use crate::models::activity_log::{ActivityEntity, ActivityLog};
use crate::repositories::ActivityLogRepository;
use crate::utils::clock::Clock;
use crate::utils::errors::AppResult;

pub struct ActivityLogService {
    repository: ActivityLogRepository,
    clock: Arc<dyn Clock>,
}

impl ActivityLogService {
    pub fn new(store: SharedStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: ActivityLogRepository::new(store),
            clock,
        }
    }

    pub fn log(
        &self,
        actor: &str,
        action: &str,
        entity: Option<ActivityEntity>,
        details: Option<String>,
    ) -> AppResult<ActivityLog> {
        let entry = ActivityLog {
            id: Uuid::new_v4(),
            timestamp: self.clock.now(),
            actor: actor.to_string(),
            action: action.to_string(),
            entity_type: entity.map(|e| e.kind().to_string()),
            entity_id: entity.map(|e| e.id()),
            details,
        };
        debug!("🧾 {} -> {}", actor, action);
        self.repository.append(entry)
    }

    /// Las `limit` actividades más recientes
    pub fn recent(&self, limit: usize) -> Vec<ActivityLog> {
        let mut entries = self.repository.list();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }

    pub fn for_entity(&self, entity_id: Uuid) -> Vec<ActivityLog> {
        let mut entries: Vec<ActivityLog> = self
            .repository
            .list()
            .into_iter()
            .filter(|entry| entry.entity_id == Some(entity_id))
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}
