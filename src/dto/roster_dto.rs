use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EntityKind, Partition};

// Query de las vistas de listado: `?partition=blocked&q=texto`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterQuery {
    pub partition: Option<Partition>,
    pub q: Option<String>,
}

// Vista de un roster ya filtrado por búsqueda
#[derive(Debug, Serialize)]
pub struct RosterView<T> {
    pub kind: EntityKind,
    pub partition: Partition,
    pub query: Option<String>,
    pub total: usize,
    pub shown: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub items: Vec<T>,
}

// Resumen del dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_drivers: usize,
    pub blocked_drivers: usize,
    pub available_drivers: usize,
    pub total_vehicles: usize,
    pub blacklisted_vehicles: usize,
    pub available_vehicles: usize,
    pub total_employees: usize,
    pub unassigned_employees: usize,
}
