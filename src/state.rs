//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación: configuración,
//! almacén, reloj y los servicios construidos sobre ellos.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::SharedStore;
use crate::services::{
    ActivityLogService, InventoryService, RepairTicketService, ServiceDueEvaluator, ServicePolicy,
    StatusHistoryService, VehicleService,
};
use crate::utils::clock::{Clock, SystemClock};

pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: SharedStore,
    pub clock: Arc<dyn Clock>,
    pub vehicles: VehicleService,
    pub repairs: RepairTicketService,
    pub inventory: InventoryService,
    pub history: StatusHistoryService,
    pub activity: ActivityLogService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: SharedStore, clock: Arc<dyn Clock>) -> Self {
        let evaluator = ServiceDueEvaluator::new(ServicePolicy::from_config(&config));
        let actor = config.actor.clone();

        Self {
            vehicles: VehicleService::new(store.clone(), clock.clone(), evaluator, actor.clone()),
            repairs: RepairTicketService::new(store.clone(), clock.clone(), actor.clone()),
            inventory: InventoryService::new(store.clone(), clock.clone(), actor),
            history: StatusHistoryService::new(store.clone(), clock.clone()),
            activity: ActivityLogService::new(store.clone(), clock.clone()),
            config,
            store,
            clock,
        }
    }

    /// Estado con el reloj del sistema
    pub fn with_system_clock(config: EnvironmentConfig, store: SharedStore) -> Self {
        Self::new(config, store, Arc::new(SystemClock))
    }
}
