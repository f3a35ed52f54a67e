//! Evaluador de mantenimiento pendiente
//!
//! Decide si un vehículo necesita servicio y proyecta el próximo punto de
//! mantenimiento a partir de la fecha y el kilometraje del último servicio.
//!
//! Todas las funciones son puras respecto al vehículo. Las variantes `_at`
//! reciben la hora de evaluación; las demás usan `Utc::now()` y la política
//! por defecto (90 días / 5000 unidades de distancia).

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

use crate::config::environment::{
    EnvironmentConfig, DEFAULT_SERVICE_DISTANCE_THRESHOLD, DEFAULT_SERVICE_INTERVAL_DAYS,
};
use crate::models::vehicle::Vehicle;
use crate::utils::validation::parse_service_date;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Umbrales de mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePolicy {
    pub interval_days: i64,
    pub distance_threshold: i64,
}

impl Default for ServicePolicy {
    fn default() -> Self {
        Self {
            interval_days: DEFAULT_SERVICE_INTERVAL_DAYS,
            distance_threshold: DEFAULT_SERVICE_DISTANCE_THRESHOLD,
        }
    }
}

impl ServicePolicy {
    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self {
            interval_days: config.service_interval_days,
            distance_threshold: config.service_distance_threshold,
        }
    }
}

/// Resumen de mantenimiento de un vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDueSummary {
    pub is_due: bool,
    /// Negativo cuando el servicio ya está vencido
    pub days_until_due: Option<i64>,
    pub distance_until_due: Option<i64>,
}

enum LastService {
    Never,
    Malformed,
    On(NaiveDate),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceDueEvaluator {
    policy: ServicePolicy,
}

impl ServiceDueEvaluator {
    pub fn new(policy: ServicePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ServicePolicy {
        self.policy
    }

    /// Sin fecha de último servicio: siempre pendiente. Con fecha: pendiente si
    /// pasó el intervalo de días o si se superó el umbral de distancia.
    pub fn is_service_due_at(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> bool {
        let date = match last_service(vehicle) {
            LastService::Never => return true,
            LastService::Malformed => return false,
            LastService::On(date) => date,
        };

        let overdue_by_time = match self.interval() {
            Some(interval) => now - start_of_day(date) > interval,
            None => false,
        };
        let distance = vehicle.mileage - vehicle.last_service_mileage.unwrap_or(0);
        let overdue_by_distance = distance > self.policy.distance_threshold;

        overdue_by_time || overdue_by_distance
    }

    /// Fecha del último servicio más el intervalo; `None` sin fecha de partida
    pub fn next_service_date(&self, vehicle: &Vehicle) -> Option<NaiveDate> {
        match last_service(vehicle) {
            LastService::On(date) => date.checked_add_signed(self.interval()?),
            LastService::Never | LastService::Malformed => None,
        }
    }

    /// Distancia estimada hasta el próximo servicio.
    ///
    /// Aproximación: supone un uso diario constante de
    /// `distance_interval / interval_days`, no el kilometraje real recorrido.
    pub fn estimated_distance_until_service_at(
        &self,
        vehicle: &Vehicle,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        let distance_interval = vehicle.distance_interval?;
        self.interval()?;
        let date = match last_service(vehicle) {
            LastService::On(date) => date,
            LastService::Never | LastService::Malformed => return None,
        };

        let days_elapsed = (now - start_of_day(date)).num_days().max(0);
        let daily_rate = distance_interval as f64 / self.policy.interval_days as f64;
        let estimated_traveled = daily_rate * days_elapsed as f64;
        let remaining = (distance_interval as f64 - estimated_traveled).max(0.0);

        Some(remaining.round() as i64)
    }

    /// Intervalo de la política como `Duration`; `None` (con aviso) si no es representable
    fn interval(&self) -> Option<Duration> {
        let interval = Some(self.policy.interval_days)
            .filter(|days| *days > 0)
            .and_then(Duration::try_days);
        if interval.is_none() {
            warn!(
                "⚠️ Intervalo de servicio inválido ({} días); se ignora la condición de tiempo",
                self.policy.interval_days
            );
        }
        interval
    }

    pub fn summary_at(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> ServiceDueSummary {
        let days_until_due = self
            .next_service_date(vehicle)
            .map(|next| ceil_days(start_of_day(next) - now));

        ServiceDueSummary {
            is_due: self.is_service_due_at(vehicle, now),
            days_until_due,
            distance_until_due: self.estimated_distance_until_service_at(vehicle, now),
        }
    }
}

/// `is_service_due_at` con la política por defecto y la hora actual
pub fn is_service_due(vehicle: &Vehicle) -> bool {
    ServiceDueEvaluator::default().is_service_due_at(vehicle, Utc::now())
}

pub fn next_service_date(vehicle: &Vehicle) -> Option<NaiveDate> {
    ServiceDueEvaluator::default().next_service_date(vehicle)
}

pub fn estimated_distance_until_service(vehicle: &Vehicle) -> Option<i64> {
    ServiceDueEvaluator::default().estimated_distance_until_service_at(vehicle, Utc::now())
}

pub fn service_due_summary(vehicle: &Vehicle) -> ServiceDueSummary {
    ServiceDueEvaluator::default().summary_at(vehicle, Utc::now())
}

fn last_service(vehicle: &Vehicle) -> LastService {
    match vehicle.last_service_date.as_deref() {
        None => LastService::Never,
        Some(raw) if raw.trim().is_empty() => LastService::Never,
        Some(raw) => match parse_service_date(raw) {
            Ok(date) => LastService::On(date),
            Err(_) => {
                warn!(
                    "⚠️ Fecha de último servicio inválida '{}' en vehículo {}; se asume sin servicio pendiente",
                    raw, vehicle.id
                );
                LastService::Malformed
            }
        },
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn ceil_days(span: Duration) -> i64 {
    let millis = span.num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}
