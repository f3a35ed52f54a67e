//! Etiquetas y estilos de presentación
//!
//! Funciones totales sobre strings: un código desconocido nunca es un error,
//! recibe una etiqueta derivada del propio código y el estilo neutro.

use crate::models::repair::RepairStatus;
use crate::models::vehicle::{VehicleStatus, VehicleType};

/// Clase de estilo para valores que no reconocemos
pub const NEUTRAL_STYLE: &str = "bg-gray-100 text-gray-800";

/// Etiqueta legible de un estado de vehículo
pub fn display_label(status: &str) -> String {
    let label = match status {
        "active" => "Active",
        "inactive" => "Inactive",
        "maintenance" => "Maintenance",
        "in_repair" => "In Repair",
        "repaired" => "Repaired",
        "ready_for_pickup" => "Ready for Pickup",
        other => return title_case(other),
    };
    label.to_string()
}

/// Clase de estilo de un estado de vehículo
pub fn status_style(status: &str) -> &'static str {
    match status {
        "active" => "bg-green-100 text-green-800",
        "inactive" => NEUTRAL_STYLE,
        "maintenance" => "bg-yellow-100 text-yellow-800",
        "in_repair" => "bg-orange-100 text-orange-800",
        "repaired" => "bg-blue-100 text-blue-800",
        "ready_for_pickup" => "bg-purple-100 text-purple-800",
        _ => NEUTRAL_STYLE,
    }
}

/// Etiqueta legible de un estado de reparación
pub fn repair_status_label(status: &str) -> String {
    let label = match status {
        "pending" => "Pending",
        "in-progress" => "In Progress",
        "completed" => "Completed",
        "cancelled" => "Cancelled",
        other => return title_case(other),
    };
    label.to_string()
}

/// Clase de estilo de un estado de reparación
pub fn repair_status_style(status: &str) -> &'static str {
    match status {
        "pending" => "bg-yellow-100 text-yellow-800",
        "in-progress" => "bg-blue-100 text-blue-800",
        "completed" => "bg-green-100 text-green-800",
        "cancelled" => "bg-red-100 text-red-800",
        _ => NEUTRAL_STYLE,
    }
}

/// Etiqueta de la categoría del vehículo
pub fn vehicle_type_label(vehicle_type: &str) -> String {
    let label = match vehicle_type {
        "car" => "Car",
        "truck" => "Truck",
        "motorcycle" => "Motorcycle",
        "suv" => "SUV",
        "van" => "Van",
        other => return title_case(other),
    };
    label.to_string()
}

impl VehicleStatus {
    pub fn label(&self) -> String {
        display_label(self.as_str())
    }

    pub fn style(&self) -> &'static str {
        status_style(self.as_str())
    }
}

impl RepairStatus {
    pub fn label(&self) -> String {
        repair_status_label(self.as_str())
    }

    pub fn style(&self) -> &'static str {
        repair_status_style(self.as_str())
    }
}

impl VehicleType {
    pub fn label(&self) -> String {
        vehicle_type_label(self.as_str())
    }
}

/// "unknown_code" -> "Unknown Code"
fn title_case(code: &str) -> String {
    let words: Vec<String> = code
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Unknown".to_string()
    } else {
        words.join(" ")
    }
}
