use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entrada del registro de actividad del taller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Texto libre: no hay autenticación detrás
    pub actor: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Entidad a la que se refiere una actividad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEntity {
    Vehicle(Uuid),
    Repair(Uuid),
    Part(Uuid),
}

impl ActivityEntity {
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityEntity::Vehicle(_) => "vehicle",
            ActivityEntity::Repair(_) => "repair",
            ActivityEntity::Part(_) => "part",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ActivityEntity::Vehicle(id) | ActivityEntity::Repair(id) | ActivityEntity::Part(id) => *id,
        }
    }
}
