//! Apertura del almacén configurado
//!
//! Equivalente al pool de conexiones: devuelve el `SharedStore` que reciben
//! repositorios y servicios.

use std::sync::Arc;

use tracing::info;

use super::json_file::JsonFileStore;
use super::store::SharedStore;
use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppResult;

/// Abrir el almacén en disco en `config.data_dir`
pub fn open_store(config: &EnvironmentConfig) -> AppResult<SharedStore> {
    let store = JsonFileStore::open(&config.data_dir)?;
    info!("✅ Almacén de datos listo en {}", store.base_path().display());
    Ok(Arc::new(store))
}
