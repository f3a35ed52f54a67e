use uuid::Uuid;

use crate::database::collections::{
    load_collection, load_collection_for_write, save_collection, REPAIRS_KEY,
};
use crate::database::SharedStore;
use crate::models::repair::RepairService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct RepairRepository {
    store: SharedStore,
}

impl RepairRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<RepairService> {
        load_collection(self.store.as_ref(), REPAIRS_KEY)
    }

    fn list_for_write(&self) -> AppResult<Vec<RepairService>> {
        load_collection_for_write(self.store.as_ref(), REPAIRS_KEY)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<RepairService> {
        self.list().into_iter().find(|repair| repair.id == id)
    }

    pub fn get(&self, id: Uuid) -> AppResult<RepairService> {
        self.find_by_id(id)
            .ok_or_else(|| not_found_error("Repair", &id.to_string()))
    }

    /// Reparaciones de un vehículo, la fecha de servicio más reciente primero
    pub fn find_by_vehicle(&self, vehicle_id: Uuid) -> Vec<RepairService> {
        let mut repairs: Vec<RepairService> = self
            .list()
            .into_iter()
            .filter(|repair| repair.vehicle_id == vehicle_id)
            .collect();
        repairs.sort_by(|a, b| {
            b.service_date
                .cmp(&a.service_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        repairs
    }

    pub fn create(&self, repair: RepairService) -> AppResult<RepairService> {
        let mut repairs = self.list_for_write()?;
        repairs.push(repair.clone());
        save_collection(self.store.as_ref(), REPAIRS_KEY, &repairs)?;
        Ok(repair)
    }

    pub fn update(&self, repair: RepairService) -> AppResult<RepairService> {
        let mut repairs = self.list_for_write()?;
        let slot = repairs
            .iter_mut()
            .find(|r| r.id == repair.id)
            .ok_or_else(|| not_found_error("Repair", &repair.id.to_string()))?;
        *slot = repair.clone();
        save_collection(self.store.as_ref(), REPAIRS_KEY, &repairs)?;
        Ok(repair)
    }

    /// Borrar todas las reparaciones de un vehículo; devuelve cuántas había
    pub fn delete_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<usize> {
        let repairs = self.list_for_write()?;
        let before = repairs.len();
        let kept: Vec<RepairService> = repairs
            .into_iter()
            .filter(|repair| repair.vehicle_id != vehicle_id)
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            save_collection(self.store.as_ref(), REPAIRS_KEY, &kept)?;
        }
        Ok(removed)
    }
}
