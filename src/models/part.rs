//! Modelo de repuesto del inventario

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_non_negative_amount;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub part_number: String,
    pub quantity: u32,
    pub unit_cost: Decimal,
    /// Por debajo o igual a este nivel hay que reponer
    #[serde(default)]
    pub reorder_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    pub fn from_request(request: CreatePartRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            part_number: request.part_number.trim().to_uppercase(),
            quantity: request.quantity,
            unit_cost: request.unit_cost,
            reorder_level: request.reorder_level.unwrap_or(0),
            supplier: request.supplier,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn needs_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Valor del stock a coste unitario
    pub fn stock_value(&self) -> Decimal {
        self.unit_cost * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub part_number: String,

    pub quantity: u32,

    #[validate(custom = "validate_non_negative_amount")]
    pub unit_cost: Decimal,

    #[serde(default)]
    pub reorder_level: Option<u32>,

    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub supplier: Option<String>,
}
