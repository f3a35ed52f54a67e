//! Colecciones persistidas
//!
//! Cada entidad vive como un array JSON bajo una clave fija. No hay
//! versionado de esquema: los campos nuevos se leen con `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::store::KeyValueStore;
use crate::utils::errors::{corrupt_collection_error, AppResult};

pub const VEHICLES_KEY: &str = "vehicles";
pub const REPAIRS_KEY: &str = "repairs";
pub const PARTS_KEY: &str = "parts";
pub const STATUS_HISTORY_KEY: &str = "vehicleStatusHistory";
pub const ACTIVITY_LOGS_KEY: &str = "activityLogs";

/// Leer una colección completa.
///
/// Nunca falla: una clave ausente, un almacén ilegible o un JSON corrupto
/// devuelven una colección vacía (los dos últimos casos quedan en el log).
/// Los registros se decodifican uno a uno: un registro ilegible se omite sin
/// arrastrar al resto.
pub fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("⚠️ No se pudo leer la colección '{}': {}", key, e);
            return Vec::new();
        }
    };

    let records = match parse_records(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("⚠️ Colección '{}' corrupta, se trata como vacía: {}", key, e);
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("⚠️ Registro {} de '{}' ilegible, se omite: {}", index, key, e);
                None
            }
        })
        .collect()
}

/// Leer una colección para modificarla y volver a guardarla.
///
/// A diferencia de `load_collection`, falla si algo no se pudo leer: guardar
/// lo que sí se leyó borraría el resto.
pub fn load_collection_for_write<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> AppResult<Vec<T>> {
    let raw = match store.get(key)? {
        Some(raw) => raw,
        None => return Ok(Vec::new()),
    };

    let records = parse_records(&raw).map_err(|e| corrupt_collection_error(key, &e.to_string()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).map_err(|e| {
                corrupt_collection_error(key, &format!("record {}: {}", index, e))
            })
        })
        .collect()
}

fn parse_records(raw: &str) -> serde_json::Result<Vec<Value>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Persistir una colección completa (lectura-modificación-escritura, gana el último)
pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> AppResult<()> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)?;
    debug!("💾 Colección '{}' guardada ({} elementos)", key, items.len());
    Ok(())
}
