//! Resumen del dashboard
//!
//! Cuenta totales a partir de todos los rosters cargados en paralelo.

use tracing::info;

use crate::cache::RosterCache;
use crate::dto::roster_dto::DashboardSummary;
use crate::models::Partition;
use crate::services::availability::available;
use crate::utils::errors::FleetResult;

/// Totales de una cache ya cargada
pub fn summarize(cache: &RosterCache) -> DashboardSummary {
    let active_drivers = cache.drivers(Partition::Active);
    let active_vehicles = cache.vehicles(Partition::Active);
    let employees = cache.employees();

    DashboardSummary {
        total_drivers: active_drivers.len() + cache.drivers(Partition::Blocked).len(),
        blocked_drivers: cache.drivers(Partition::Blocked).len(),
        available_drivers: available(active_drivers, true).len(),
        total_vehicles: active_vehicles.len() + cache.vehicles(Partition::Blocked).len(),
        blacklisted_vehicles: cache.vehicles(Partition::Blocked).len(),
        available_vehicles: available(active_vehicles, true).len(),
        total_employees: employees.len(),
        unassigned_employees: available(employees, true).len(),
    }
}

pub async fn load_summary(cache: &mut RosterCache) -> FleetResult<DashboardSummary> {
    cache.load_all().await?;
    let summary = summarize(cache);
    info!(
        "📊 Dashboard: {} conductores, {} vehículos, {} empleados",
        summary.total_drivers, summary.total_vehicles, summary.total_employees
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InMemoryBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_demo_summary() {
        let mut cache = RosterCache::new(Arc::new(InMemoryBackend::demo()));
        let summary = load_summary(&mut cache).await.unwrap();
        assert_eq!(
            summary,
            DashboardSummary {
                total_drivers: 3,
                blocked_drivers: 1,
                available_drivers: 2,
                total_vehicles: 2,
                blacklisted_vehicles: 0,
                available_vehicles: 2,
                total_employees: 2,
                unassigned_employees: 2,
            }
        );
    }
}
