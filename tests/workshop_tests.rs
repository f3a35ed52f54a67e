use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use taller_backend::config::environment::EnvironmentConfig;
use taller_backend::database::collections::{STATUS_HISTORY_KEY, VEHICLES_KEY};
use taller_backend::database::{open_store, InMemoryStore, KeyValueStore, SharedStore};
use taller_backend::models::{
    CreateRepairRequest, CreatePartRequest, CreateVehicleRequest, RepairStatus, VehicleFilters,
    VehicleStatus,
};
use taller_backend::services::service_due::{is_service_due, next_service_date};
use taller_backend::services::status_display::display_label;
use taller_backend::utils::clock::ManualClock;
use taller_backend::{AppError, AppState};

fn create_test_state() -> (AppState, SharedStore, Arc<ManualClock>) {
    let store = InMemoryStore::shared();
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    let state = AppState::new(EnvironmentConfig::default(), store.clone(), clock.clone());
    (state, store, clock)
}

fn vehicle_request(vin: &str, last_service_date: Option<&str>) -> CreateVehicleRequest {
    CreateVehicleRequest {
        make: "Volkswagen".to_string(),
        model: "Golf".to_string(),
        year: 2016,
        vin: vin.to_string(),
        license_plate: "9012-FGH".to_string(),
        vehicle_type: None,
        mileage: 50_000,
        last_service_date: last_service_date.map(str::to_string),
        last_service_mileage: Some(44_000),
        service_interval: None,
        distance_interval: Some(10_000),
        purchase_price: Some(Decimal::new(1_200_000, 2)),
        market_value: Some(Decimal::new(1_300_000, 2)),
    }
}

#[test]
fn test_distance_triggers_service_even_when_recently_serviced() {
    let (state, _store, _clock) = create_test_state();
    // Diez días antes del reloj de prueba
    let vehicle = state
        .vehicles
        .create_vehicle(vehicle_request("WVWZZZ1KZ6W123456", Some("2024-05-22")))
        .unwrap();

    let summary = state.vehicles.service_summary(vehicle.id).unwrap();
    assert!(summary.is_due);
    assert_eq!(summary.days_until_due, Some(80));
    // 10_000 / 90 por día durante 10 días
    assert_eq!(summary.distance_until_due, Some(8_889));
}

#[test]
fn test_default_policy_helpers() {
    let (state, _store, _clock) = create_test_state();
    let never = state
        .vehicles
        .create_vehicle(vehicle_request("WVWZZZ1KZ6W123456", None))
        .unwrap();
    assert!(is_service_due(&never));
    assert_eq!(next_service_date(&never), None);

    let serviced = state
        .vehicles
        .create_vehicle(vehicle_request("WVWZZZ1KZ6W654321", Some("2024-01-01")))
        .unwrap();
    assert_eq!(
        next_service_date(&serviced),
        Some(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
    );
}

#[test]
fn test_full_repair_lifecycle() {
    let (state, _store, clock) = create_test_state();
    let vehicle = state
        .vehicles
        .create_vehicle(vehicle_request("WVWZZZ1KZ6W123456", Some("2023-11-02")))
        .unwrap();

    clock.advance(Duration::minutes(5));
    state
        .vehicles
        .change_status(vehicle.id, VehicleStatus::InRepair, Some("Entra en taller".to_string()))
        .unwrap();

    clock.advance(Duration::hours(2));
    let repair = state
        .repairs
        .create_repair(CreateRepairRequest {
            vehicle_id: vehicle.id,
            description: "Revisión completa".to_string(),
            service_date: "2024-06-01".to_string(),
            technician: "Carmen".to_string(),
            labor_hours: 3.0,
            cost: Decimal::new(45_000, 2),
            parts: vec!["Filtro aceite".to_string(), "Filtro aire".to_string()],
            notes: None,
            images: vec![],
        })
        .unwrap();
    state.repairs.set_status(repair.id, RepairStatus::InProgress).unwrap();

    clock.advance(Duration::hours(3));
    let completion = state.repairs.complete_repair(repair.id, None).unwrap();
    assert_eq!(completion.vehicle.status, VehicleStatus::Repaired);

    clock.advance(Duration::hours(1));
    state
        .vehicles
        .change_status(vehicle.id, VehicleStatus::ReadyForPickup, None)
        .unwrap();

    let history = state.history.history_for(vehicle.id);
    let transitions: Vec<(VehicleStatus, VehicleStatus)> = history
        .iter()
        .map(|entry| (entry.previous_status, entry.new_status))
        .collect();
    assert_eq!(
        transitions,
        vec![
            (VehicleStatus::Repaired, VehicleStatus::ReadyForPickup),
            (VehicleStatus::InRepair, VehicleStatus::Repaired),
            (VehicleStatus::Active, VehicleStatus::InRepair),
        ]
    );
    assert_eq!(history[1].associated_repair_id, Some(repair.id));
    assert_eq!(display_label(history[0].new_status.as_str()), "Ready for Pickup");

    // Recién servido y con el kilometraje base actualizado
    let summary = state.vehicles.service_summary(vehicle.id).unwrap();
    assert!(!summary.is_due);

    // 13000 - (12000 + 450)
    let financials = state.vehicles.financials(vehicle.id).unwrap();
    assert_eq!(financials.repair_costs, Decimal::new(45_000, 2));
    assert_eq!(financials.profit_loss, Some(Decimal::new(55_000, 2)));

    // Par terminal: no se vuelve a `active`
    let err = state
        .vehicles
        .change_status(vehicle.id, VehicleStatus::Active, None)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    let actions: Vec<String> = state
        .activity
        .for_entity(vehicle.id)
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            "vehicle.status_changed",
            "vehicle.status_changed",
            "vehicle.created"
        ]
    );
}

#[test]
fn test_delete_vehicle_cascades() {
    let (state, _store, _clock) = create_test_state();
    let doomed = state
        .vehicles
        .create_vehicle(vehicle_request("WVWZZZ1KZ6W123456", None))
        .unwrap();
    let survivor = state
        .vehicles
        .create_vehicle(vehicle_request("WVWZZZ1KZ6W654321", None))
        .unwrap();

    for id in [doomed.id, survivor.id] {
        state
            .vehicles
            .change_status(id, VehicleStatus::Maintenance, None)
            .unwrap();
        state
            .repairs
            .create_repair(CreateRepairRequest {
                vehicle_id: id,
                description: "Neumáticos".to_string(),
                service_date: "2024-05-30".to_string(),
                technician: "Iker".to_string(),
                labor_hours: 1.0,
                cost: Decimal::new(30_000, 2),
                parts: vec![],
                notes: None,
                images: vec![],
            })
            .unwrap();
    }

    let deleted = state.vehicles.delete_vehicle(doomed.id).unwrap();
    assert_eq!(deleted.repairs_removed, 1);
    assert_eq!(deleted.history_removed, 1);

    assert!(state.history.history_for(doomed.id).is_empty());
    assert!(state.repairs.repairs_for_vehicle(doomed.id).is_empty());
    assert_eq!(state.history.history_for(survivor.id).len(), 1);
    assert_eq!(state.repairs.repairs_for_vehicle(survivor.id).len(), 1);

    let err = state.vehicles.delete_vehicle(doomed.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_corrupt_collections_degrade_to_empty() {
    let (state, store, _clock) = create_test_state();
    store.set(VEHICLES_KEY, "not json at all").unwrap();
    store.set(STATUS_HISTORY_KEY, "[{\"id\": 42}").unwrap();

    assert!(state.vehicles.list_vehicles(&VehicleFilters::default()).is_empty());
    assert!(state.history.history_for(Uuid::new_v4()).is_empty());
    assert!(state.vehicles.service_report().is_empty());
}

#[test]
fn test_state_survives_reopening_json_store() {
    let dir = std::env::temp_dir().join(format!("taller-it-{}", Uuid::new_v4()));
    let config = EnvironmentConfig {
        data_dir: dir.clone(),
        ..EnvironmentConfig::default()
    };

    let vehicle_id = {
        let state = AppState::with_system_clock(config.clone(), open_store(&config).unwrap());
        let vehicle = state
            .vehicles
            .create_vehicle(vehicle_request("WVWZZZ1KZ6W123456", Some("2024-05-01")))
            .unwrap();
        state
            .vehicles
            .change_status(vehicle.id, VehicleStatus::InRepair, None)
            .unwrap();
        state
            .inventory
            .add_part(CreatePartRequest {
                name: "Correa distribución".to_string(),
                part_number: "CD-22".to_string(),
                quantity: 1,
                unit_cost: Decimal::new(8_900, 2),
                reorder_level: Some(2),
                supplier: Some("Recambios Norte".to_string()),
            })
            .unwrap();
        vehicle.id
    };

    let reopened = AppState::with_system_clock(config.clone(), open_store(&config).unwrap());
    let vehicle = reopened.vehicles.get_vehicle(vehicle_id).unwrap();
    assert_eq!(vehicle.status, VehicleStatus::InRepair);
    assert_eq!(reopened.history.history_for(vehicle_id).len(), 1);
    assert_eq!(reopened.inventory.low_stock().len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}
