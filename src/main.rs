use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info, warn};

use taller_backend::config::environment::EnvironmentConfig;
use taller_backend::database::open_store;
use taller_backend::models::VehicleFilters;
use taller_backend::AppState;

fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🔧 Taller - informe de mantenimiento");
    info!("====================================");
    info!("   Entorno: {}", config.environment);
    info!(
        "   Política: {} días / {} unidades de distancia",
        config.service_interval_days, config.service_distance_threshold
    );

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error abriendo el almacén de datos: {}", e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };

    let state = AppState::with_system_clock(config, store);

    let vehicles = state.vehicles.list_vehicles(&VehicleFilters::default());
    info!("🚗 {} vehículos registrados", vehicles.len());

    for line in state.vehicles.service_report() {
        let days = line
            .service
            .days_until_due
            .map(|d| format!("{} días", d))
            .unwrap_or_else(|| "sin fecha".to_string());
        let distance = line
            .service
            .distance_until_due
            .map(|d| format!("{} km", d))
            .unwrap_or_else(|| "-".to_string());

        if line.service.is_due {
            warn!(
                "🛠️ {} [{}] {} - SERVICIO PENDIENTE ({}, {})",
                line.display_name, line.license_plate, line.status_label, days, distance
            );
        } else {
            info!(
                "✅ {} [{}] {} - próximo servicio en {} ({})",
                line.display_name, line.license_plate, line.status_label, days, distance
            );
        }
    }

    let low_stock = state.inventory.low_stock();
    if low_stock.is_empty() {
        info!("📦 Inventario sin alertas (valor {})", state.inventory.inventory_value());
    } else {
        for part in low_stock {
            warn!(
                "📦 Reponer {} ({}): {} unidades",
                part.name, part.part_number, part.quantity
            );
        }
    }

    Ok(())
}
