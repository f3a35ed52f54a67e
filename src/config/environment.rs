//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_SERVICE_INTERVAL_DAYS: i64 = 90;
pub const DEFAULT_SERVICE_DISTANCE_THRESHOLD: i64 = 5000;
/// Mismo tope que aceptan los formularios de vehículo
pub const MAX_SERVICE_INTERVAL_DAYS: i64 = 3650;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub service_interval_days: i64,
    pub service_distance_threshold: i64,
    /// Nombre que firma las entradas del registro de actividad
    pub actor: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            service_interval_days: DEFAULT_SERVICE_INTERVAL_DAYS,
            service_distance_threshold: DEFAULT_SERVICE_DISTANCE_THRESHOLD,
            actor: "system".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno del proceso; las variables ausentes
    /// toman el valor por defecto.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let service_interval_days = parse_var(&lookup, "SERVICE_INTERVAL_DAYS")?
            .unwrap_or(defaults.service_interval_days);
        let service_distance_threshold = parse_var(&lookup, "SERVICE_DISTANCE_THRESHOLD")?
            .unwrap_or(defaults.service_distance_threshold);

        if !(1..=MAX_SERVICE_INTERVAL_DAYS).contains(&service_interval_days) {
            return Err(AppError::Config(format!(
                "SERVICE_INTERVAL_DAYS must be between 1 and {}, got {}",
                MAX_SERVICE_INTERVAL_DAYS, service_interval_days
            )));
        }
        if service_distance_threshold < 0 {
            return Err(AppError::Config(
                "SERVICE_DISTANCE_THRESHOLD must not be negative".to_string(),
            ));
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            data_dir: lookup("TALLER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            service_interval_days,
            service_distance_threshold,
            actor: lookup("TALLER_ACTOR").unwrap_or(defaults.actor),
        })
    }

    /// Nivel de log para `tracing_subscriber`; los valores desconocidos caen a INFO
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} must be a valid number, got '{}'", key, raw))),
        None => Ok(None),
    }
}
