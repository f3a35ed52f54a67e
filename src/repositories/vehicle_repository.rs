use uuid::Uuid;

use crate::database::collections::{
    load_collection, load_collection_for_write, save_collection, VEHICLES_KEY,
};
use crate::database::SharedStore;
use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct VehicleRepository {
    store: SharedStore,
}

impl VehicleRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Vehicle> {
        load_collection(self.store.as_ref(), VEHICLES_KEY)
    }

    fn list_for_write(&self) -> AppResult<Vec<Vehicle>> {
        load_collection_for_write(self.store.as_ref(), VEHICLES_KEY)
    }

    /// Vehículos que cumplen los filtros, más recientes primero
    pub fn search(&self, filters: &VehicleFilters) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self
            .list()
            .into_iter()
            .filter(|vehicle| filters.matches(vehicle))
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        vehicles
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Vehicle> {
        self.list().into_iter().find(|vehicle| vehicle.id == id)
    }

    pub fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        self.find_by_id(id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    /// ¿Existe otro vehículo con este VIN?
    pub fn vin_exists(&self, vin: &str, exclude: Option<Uuid>) -> bool {
        self.list()
            .iter()
            .any(|vehicle| vehicle.vin.eq_ignore_ascii_case(vin) && Some(vehicle.id) != exclude)
    }

    pub fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.list_for_write()?;
        if vehicles.iter().any(|v| v.vin.eq_ignore_ascii_case(&vehicle.vin)) {
            return Err(conflict_error("Vehicle", "vin", &vehicle.vin));
        }
        vehicles.push(vehicle.clone());
        save_collection(self.store.as_ref(), VEHICLES_KEY, &vehicles)?;
        Ok(vehicle)
    }

    /// Reemplazar el registro con el mismo id
    pub fn update(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.list_for_write()?;
        let slot = vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or_else(|| not_found_error("Vehicle", &vehicle.id.to_string()))?;
        *slot = vehicle.clone();
        save_collection(self.store.as_ref(), VEHICLES_KEY, &vehicles)?;
        Ok(vehicle)
    }

    pub fn delete(&self, id: Uuid) -> AppResult<Vehicle> {
        let mut vehicles = self.list_for_write()?;
        let position = vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        let removed = vehicles.remove(position);
        save_collection(self.store.as_ref(), VEHICLES_KEY, &vehicles)?;
        Ok(removed)
    }
}
