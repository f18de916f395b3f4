//! Controllers
//!
//! Cada controller representa una vista montada: crea su propia cache de
//! rosters a partir del estado compartido, la carga y devuelve el modelo de
//! la vista.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod employee_controller;
pub mod pairing_controller;
pub mod vehicle_controller;

use crate::cache::RosterCache;
use crate::dto::roster_dto::RosterView;
use crate::models::{Partition, RosterEntity};
use crate::services::search;

/// Construir la vista de un roster ya cargado aplicando la búsqueda
pub(crate) fn roster_view<T: RosterEntity>(
    cache: &RosterCache,
    items: &[T],
    partition: Partition,
    query: Option<String>,
    fields: &[&str],
) -> RosterView<T> {
    let query = query.filter(|q| !q.is_empty());
    let shown: Vec<T> = search(items, query.as_deref().unwrap_or(""), fields)
        .into_iter()
        .cloned()
        .collect();

    RosterView {
        kind: T::KIND,
        partition,
        total: items.len(),
        shown: shown.len(),
        loaded_at: cache.snapshot(T::KIND, partition).map(|s| s.loaded_at),
        query,
        items: shown,
    }
}
