//! Almacén clave-valor
//!
//! Cada colección de entidades se guarda como un array JSON bajo una clave fija.
//! El almacén se inyecta como `SharedStore` en repositorios y servicios.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::utils::errors::AppResult;

/// Operaciones mínimas de un almacén clave-valor
pub trait KeyValueStore: Send + Sync {
    /// Valor crudo bajo `key`, `None` si nunca se escribió
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Reemplazar el valor bajo `key`
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Eliminar `key`; no es error si no existe
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Claves presentes, ordenadas
    fn keys(&self) -> AppResult<Vec<String>>;
}

/// Handle compartido, equivalente al pool de conexiones
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Almacén en memoria; sirve de fake en los tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear un `SharedStore` vacío
    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
