//! Inventario de repuestos

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::activity_log_service::ActivityLogService;
use crate::database::SharedStore;
use crate::models::activity_log::ActivityEntity;
use crate::models::part::{CreatePartRequest, Part};
use crate::repositories::PartRepository;
use crate::utils::clock::Clock;
use crate::utils::errors::{bad_request_error, AppResult};

pub struct InventoryService {
    parts: PartRepository,
    activity: ActivityLogService,
    clock: Arc<dyn Clock>,
    actor: String,
}

impl InventoryService {
    pub fn new(store: SharedStore, clock: Arc<dyn Clock>, actor: impl Into<String>) -> Self {
        Self {
            parts: PartRepository::new(store.clone()),
            activity: ActivityLogService::new(store, clock.clone()),
            clock,
            actor: actor.into(),
        }
    }

    pub fn add_part(&self, request: CreatePartRequest) -> AppResult<Part> {
        request.validate()?;
        let part = self
            .parts
            .create(Part::from_request(request, self.clock.now()))?;

        info!("📦 Repuesto añadido: {} ({})", part.name, part.part_number);
        self.activity.log(
            &self.actor,
            "part.created",
            Some(ActivityEntity::Part(part.id)),
            Some(part.part_number.clone()),
        )?;
        Ok(part)
    }

    /// Repuestos ordenados por nombre
    pub fn list_parts(&self) -> Vec<Part> {
        let mut parts = self.parts.list();
        parts.sort_by(|a, b| a.name.cmp(&b.name));
        parts
    }

    /// Sumar (o restar, con `delta` negativo) unidades de stock
    pub fn adjust_stock(&self, id: Uuid, delta: i64, reason: Option<&str>) -> AppResult<Part> {
        let mut part = self.parts.get(id)?;
        let new_quantity = i64::from(part.quantity) + delta;
        if new_quantity < 0 {
            return Err(bad_request_error(&format!(
                "not enough stock for {}: have {}, requested {}",
                part.part_number, part.quantity, -delta
            )));
        }
        part.quantity = u32::try_from(new_quantity)
            .map_err(|_| bad_request_error("stock quantity out of range"))?;
        part.updated_at = self.clock.now();

        let part = self.parts.update(part)?;
        if part.needs_reorder() {
            warn!(
                "⚠️ Stock bajo de {}: {} unidades (nivel de reposición {})",
                part.part_number, part.quantity, part.reorder_level
            );
        }

        let mut details = format!("{:+} -> {}", delta, part.quantity);
        if let Some(reason) = reason {
            details.push_str(&format!(" ({})", reason));
        }
        self.activity.log(
            &self.actor,
            "part.stock_adjusted",
            Some(ActivityEntity::Part(id)),
            Some(details),
        )?;
        Ok(part)
    }

    /// Repuestos en o por debajo de su nivel de reposición
    pub fn low_stock(&self) -> Vec<Part> {
        self.list_parts()
            .into_iter()
            .filter(Part::needs_reorder)
            .collect()
    }

    /// Valor total del inventario a coste
    pub fn inventory_value(&self) -> Decimal {
        self.parts.list().iter().map(Part::stock_value).sum()
    }
}
