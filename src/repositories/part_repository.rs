use uuid::Uuid;

use crate::database::collections::{
    load_collection, load_collection_for_write, save_collection, PARTS_KEY,
};
use crate::database::SharedStore;
use crate::models::part::Part;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct PartRepository {
    store: SharedStore,
}

impl PartRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Part> {
        load_collection(self.store.as_ref(), PARTS_KEY)
    }

    fn list_for_write(&self) -> AppResult<Vec<Part>> {
        load_collection_for_write(self.store.as_ref(), PARTS_KEY)
    }

    pub fn get(&self, id: Uuid) -> AppResult<Part> {
        self.list()
            .into_iter()
            .find(|part| part.id == id)
            .ok_or_else(|| not_found_error("Part", &id.to_string()))
    }

    pub fn create(&self, part: Part) -> AppResult<Part> {
        let mut parts = self.list_for_write()?;
        if parts
            .iter()
            .any(|p| p.part_number.eq_ignore_ascii_case(&part.part_number))
        {
            return Err(conflict_error("Part", "part number", &part.part_number));
        }
        parts.push(part.clone());
        save_collection(self.store.as_ref(), PARTS_KEY, &parts)?;
        Ok(part)
    }

    pub fn update(&self, part: Part) -> AppResult<Part> {
        let mut parts = self.list_for_write()?;
        let slot = parts
            .iter_mut()
            .find(|p| p.id == part.id)
            .ok_or_else(|| not_found_error("Part", &part.id.to_string()))?;
        *slot = part.clone();
        save_collection(self.store.as_ref(), PARTS_KEY, &parts)?;
        Ok(part)
    }
}
