//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Se serializa en camelCase, la forma en que la colección `vehicles` ya
//! está guardada.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::DEFAULT_SERVICE_INTERVAL_DAYS;
use crate::utils::validation::{
    validate_license_plate, validate_non_negative_amount, validate_service_date, VIN_REGEX,
};

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Maintenance,
    InRepair,
    Repaired,
    ReadyForPickup,
    /// Código guardado que no reconocemos; solo aparece al leer
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 6] = [
        VehicleStatus::Active,
        VehicleStatus::Inactive,
        VehicleStatus::Maintenance,
        VehicleStatus::InRepair,
        VehicleStatus::Repaired,
        VehicleStatus::ReadyForPickup,
    ];

    /// Código interno, igual al valor serializado
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::InRepair => "in_repair",
            VehicleStatus::Repaired => "repaired",
            VehicleStatus::ReadyForPickup => "ready_for_pickup",
            VehicleStatus::Unknown => "unknown",
        }
    }

    /// `repaired` y `ready_for_pickup`: trabajo terminado
    pub fn is_completed(&self) -> bool {
        matches!(self, VehicleStatus::Repaired | VehicleStatus::ReadyForPickup)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown vehicle status '{}'", s))
    }
}

/// Categoría del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Truck,
    Motorcycle,
    Suv,
    Van,
    #[serde(other)]
    Unknown,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Truck => "truck",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Suv => "suv",
            VehicleType::Van => "van",
            VehicleType::Unknown => "unknown",
        }
    }
}

fn default_service_interval() -> i64 {
    DEFAULT_SERVICE_INTERVAL_DAYS
}

/// Vehicle principal - mapea exactamente a la colección `vehicles`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub license_plate: String,
    /// Vehículos guardados antes de existir el campo se leen como `car`
    #[serde(rename = "type", default)]
    pub vehicle_type: VehicleType,
    pub mileage: i64,
    pub status: VehicleStatus,
    /// Texto tal como lo escribió la UI (`YYYY-MM-DD` o RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_service_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_service_mileage: Option<i64>,
    /// Días entre servicios
    #[serde(default = "default_service_interval")]
    pub service_interval: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Vehicle {
    /// Construir un vehículo nuevo (estado `active`) desde un request ya validado
    pub fn from_request(request: CreateVehicleRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            make: request.make.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            vin: request.vin,
            license_plate: request.license_plate.trim().to_uppercase(),
            vehicle_type: request.vehicle_type.unwrap_or_default(),
            mileage: request.mileage,
            status: VehicleStatus::Active,
            last_service_date: request.last_service_date,
            last_service_mileage: request.last_service_mileage,
            service_interval: request
                .service_interval
                .unwrap_or(DEFAULT_SERVICE_INTERVAL_DAYS),
            distance_interval: request.distance_interval,
            purchase_price: request.purchase_price,
            market_value: request.market_value,
            created_at: now,
            last_updated: now,
        }
    }

    /// Aplicar una edición. El estado no se toca aquí: solo cambia a través
    /// de las reglas de transición.
    pub fn apply_update(&mut self, request: UpdateVehicleRequest, now: DateTime<Utc>) {
        if let Some(make) = request.make {
            self.make = make.trim().to_string();
        }
        if let Some(model) = request.model {
            self.model = model.trim().to_string();
        }
        if let Some(year) = request.year {
            self.year = year;
        }
        if let Some(vin) = request.vin {
            self.vin = vin;
        }
        if let Some(license_plate) = request.license_plate {
            self.license_plate = license_plate.trim().to_uppercase();
        }
        if let Some(vehicle_type) = request.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        if let Some(mileage) = request.mileage {
            self.mileage = mileage;
        }
        if let Some(date) = request.last_service_date {
            self.last_service_date = Some(date);
        }
        if let Some(last_mileage) = request.last_service_mileage {
            self.last_service_mileage = Some(last_mileage);
        }
        if let Some(interval) = request.service_interval {
            self.service_interval = interval;
        }
        if let Some(distance) = request.distance_interval {
            self.distance_interval = Some(distance);
        }
        if let Some(price) = request.purchase_price {
            self.purchase_price = Some(price);
        }
        if let Some(value) = request.market_value {
            self.market_value = Some(value);
        }
        self.last_updated = now;
    }

    /// "2019 Toyota Corolla"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,

    #[validate(regex = "VIN_REGEX")]
    pub vin: String,

    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,

    #[serde(rename = "type", default)]
    pub vehicle_type: Option<VehicleType>,

    #[validate(range(min = 0))]
    pub mileage: i64,

    #[validate(custom = "validate_service_date")]
    #[serde(default)]
    pub last_service_date: Option<String>,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub last_service_mileage: Option<i64>,

    #[validate(range(min = 1, max = 3650))]
    #[serde(default)]
    pub service_interval: Option<i64>,

    #[validate(range(min = 1))]
    #[serde(default)]
    pub distance_interval: Option<i64>,

    #[validate(custom = "validate_non_negative_amount")]
    #[serde(default)]
    pub purchase_price: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    #[serde(default)]
    pub market_value: Option<Decimal>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,

    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,

    #[validate(regex = "VIN_REGEX")]
    pub vin: Option<String>,

    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,

    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    #[validate(custom = "validate_service_date")]
    pub last_service_date: Option<String>,

    #[validate(range(min = 0))]
    pub last_service_mileage: Option<i64>,

    #[validate(range(min = 1, max = 3650))]
    pub service_interval: Option<i64>,

    #[validate(range(min = 1))]
    pub distance_interval: Option<i64>,

    #[validate(custom = "validate_non_negative_amount")]
    pub purchase_price: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub market_value: Option<Decimal>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub make: Option<String>,
}

impl VehicleFilters {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(status) = self.status {
            if vehicle.status != status {
                return false;
            }
        }
        if let Some(vehicle_type) = self.vehicle_type {
            if vehicle.vehicle_type != vehicle_type {
                return false;
            }
        }
        if let Some(make) = &self.make {
            if !vehicle.make.eq_ignore_ascii_case(make) {
                return false;
            }
        }
        true
    }
}
