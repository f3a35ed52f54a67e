//! Modelo de reparación (orden de servicio sobre un vehículo)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{
    validate_non_negative_amount, validate_not_empty, validate_service_date,
};

/// Estado de la reparación
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl RepairStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Pending => "pending",
            RepairStatus::InProgress => "in-progress",
            RepairStatus::Completed => "completed",
            RepairStatus::Cancelled => "cancelled",
            RepairStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepairService {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub service_date: NaiveDate,
    pub technician: String,
    pub labor_hours: f64,
    pub cost: Decimal,
    pub status: RepairStatus,
    #[serde(default)]
    pub parts: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RepairService {
    pub fn is_completed(&self) -> bool {
        self.status == RepairStatus::Completed
    }
}

/// Request para abrir una reparación
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepairRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 500), custom = "validate_not_empty")]
    pub description: String,

    #[validate(custom = "validate_service_date")]
    pub service_date: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_empty")]
    pub technician: String,

    #[validate(range(min = 0.0, max = 1000.0))]
    pub labor_hours: f64,

    #[validate(custom = "validate_non_negative_amount")]
    pub cost: Decimal,

    #[serde(default)]
    pub parts: Vec<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,
}

/// Request para editar una reparación.
///
/// Con la reparación completada solo se aceptan `notes` e `images`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepairRequest {
    #[validate(length(min = 1, max = 500), custom = "validate_not_empty")]
    pub description: Option<String>,

    #[validate(custom = "validate_service_date")]
    pub service_date: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_empty")]
    pub technician: Option<String>,

    #[validate(range(min = 0.0, max = 1000.0))]
    pub labor_hours: Option<f64>,

    #[validate(custom = "validate_non_negative_amount")]
    pub cost: Option<Decimal>,

    pub parts: Option<Vec<String>>,

    pub notes: Option<String>,

    pub images: Option<Vec<String>>,
}

impl UpdateRepairRequest {
    /// Campos bloqueados una vez completada la reparación
    pub fn locked_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.description.is_some() {
            fields.push("description");
        }
        if self.service_date.is_some() {
            fields.push("serviceDate");
        }
        if self.technician.is_some() {
            fields.push("technician");
        }
        if self.labor_hours.is_some() {
            fields.push("laborHours");
        }
        if self.cost.is_some() {
            fields.push("cost");
        }
        if self.parts.is_some() {
            fields.push("parts");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repair_status_wire_format() {
        assert_eq!(
            serde_json::to_value(RepairStatus::InProgress).unwrap(),
            json!("in-progress")
        );
        let status: RepairStatus = serde_json::from_value(json!("cancelled")).unwrap();
        assert_eq!(status, RepairStatus::Cancelled);
    }

    #[test]
    fn test_locked_fields() {
        let notes_only = UpdateRepairRequest {
            notes: Some("Cliente avisado".to_string()),
            images: Some(vec!["foto1.jpg".to_string()]),
            ..Default::default()
        };
        assert!(notes_only.locked_fields().is_empty());

        let cost_change = UpdateRepairRequest {
            cost: Some(Decimal::new(15000, 2)),
            technician: Some("Luis".to_string()),
            ..Default::default()
        };
        assert_eq!(cost_change.locked_fields(), vec!["technician", "cost"]);
    }

    #[test]
    fn test_create_request_rejects_negative_cost() {
        let request = CreateRepairRequest {
            vehicle_id: Uuid::new_v4(),
            description: "Cambio de aceite".to_string(),
            service_date: "2024-03-01".to_string(),
            technician: "Marta".to_string(),
            labor_hours: 1.5,
            cost: Decimal::new(-100, 0),
            parts: vec![],
            notes: None,
            images: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_description_and_technician_are_rejected() {
        let request = CreateRepairRequest {
            vehicle_id: Uuid::new_v4(),
            description: "   ".to_string(),
            service_date: "2024-03-01".to_string(),
            technician: "Marta".to_string(),
            labor_hours: 1.5,
            cost: Decimal::new(100, 0),
            parts: vec![],
            notes: None,
            images: vec![],
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));

        let update = UpdateRepairRequest {
            technician: Some(" ".to_string()),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("technician"));
    }
}
