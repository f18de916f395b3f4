//! Cache de rosters por vista
//!
//! Guarda el último listado recibido del backend por (tipo, partición).
//! Nunca se parchea localmente: tras cada escritura confirmada se vuelve a
//! cargar completo. Cada vista crea su propia instancia.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::clients::{FleetBackend, SharedBackend};
use crate::models::{
    Driver, Employee, EntityId, EntityKind, PairingKind, Partition, RosterEntity, Vehicle,
};
use crate::utils::errors::{FleetError, FleetResult};

/// Conjunto de entidades de un tipo tal como lo devolvió el backend
#[derive(Debug, Clone, PartialEq)]
pub enum Roster {
    Drivers(Vec<Driver>),
    Vehicles(Vec<Vehicle>),
    Employees(Vec<Employee>),
}

impl Roster {
    pub fn kind(&self) -> EntityKind {
        match self {
            Roster::Drivers(_) => EntityKind::Driver,
            Roster::Vehicles(_) => EntityKind::Vehicle,
            Roster::Employees(_) => EntityKind::Employee,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Roster::Drivers(items) => items.len(),
            Roster::Vehicles(items) => items.len(),
            Roster::Employees(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids en el orden del backend
    pub fn ids(&self) -> Vec<&EntityId> {
        match self {
            Roster::Drivers(items) => items.iter().map(RosterEntity::id).collect(),
            Roster::Vehicles(items) => items.iter().map(RosterEntity::id).collect(),
            Roster::Employees(items) => items.iter().map(RosterEntity::id).collect(),
        }
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids().into_iter().any(|candidate| candidate == id)
    }
}

#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub roster: Roster,
    pub loaded_at: DateTime<Utc>,
}

/// Descartar entidades fuera de su partición y colapsar ids duplicados
/// (posición de la primera aparición, valor de la última)
fn sanitize<T: RosterEntity>(items: Vec<T>, partition: Partition) -> Vec<T> {
    let mut positions: HashMap<EntityId, usize> = HashMap::with_capacity(items.len());
    let mut clean: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        if !partition.admits(item.is_blocked()) {
            warn!(
                "⚠️ {} {} descartado: no pertenece a la partición {}",
                T::KIND,
                item.id(),
                partition
            );
            continue;
        }
        match positions.get(item.id()) {
            Some(&index) => {
                debug!("🔁 {} {} duplicado en el listado", T::KIND, item.id());
                clean[index] = item;
            }
            None => {
                positions.insert(item.id().clone(), clean.len());
                clean.push(item);
            }
        }
    }

    clean
}

/// Descargar un roster sin tocar ninguna cache
async fn fetch_roster(
    backend: &dyn FleetBackend,
    kind: EntityKind,
    partition: Partition,
) -> FleetResult<Roster> {
    if partition == Partition::Blocked && !kind.has_blocked_partition() {
        return Err(FleetError::Unsupported(format!(
            "{}s have no blocked partition",
            kind
        )));
    }

    let roster = match kind {
        EntityKind::Driver => {
            Roster::Drivers(sanitize(backend.list_drivers(partition).await?, partition))
        }
        EntityKind::Vehicle => {
            Roster::Vehicles(sanitize(backend.list_vehicles(partition).await?, partition))
        }
        EntityKind::Employee => {
            Roster::Employees(sanitize(backend.list_employees().await?, partition))
        }
    };

    debug!("📋 Roster {} ({}) con {} entradas", kind, partition, roster.len());
    Ok(roster)
}

/// Cache de rosters de una vista
pub struct RosterCache {
    backend: SharedBackend,
    snapshots: HashMap<(EntityKind, Partition), RosterSnapshot>,
}

impl RosterCache {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            backend,
            snapshots: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    fn store(&mut self, kind: EntityKind, partition: Partition, roster: Roster) {
        self.snapshots.insert(
            (kind, partition),
            RosterSnapshot {
                roster,
                loaded_at: Utc::now(),
            },
        );
    }

    /// Descargar y reemplazar el roster de (kind, partition).
    ///
    /// Si la descarga falla el roster anterior queda intacto.
    pub async fn load(&mut self, kind: EntityKind, partition: Partition) -> FleetResult<&Roster> {
        let roster = fetch_roster(self.backend.as_ref(), kind, partition).await?;
        info!("🔄 Roster {} ({}) recargado: {} entradas", kind, partition, roster.len());
        self.store(kind, partition, roster);
        self.get(kind, partition)
            .ok_or_else(|| FleetError::Fetch(format!("{} roster vanished after load", kind)))
    }

    /// Último roster cargado, sin red
    pub fn get(&self, kind: EntityKind, partition: Partition) -> Option<&Roster> {
        self.snapshots
            .get(&(kind, partition))
            .map(|snapshot| &snapshot.roster)
    }

    pub fn snapshot(&self, kind: EntityKind, partition: Partition) -> Option<&RosterSnapshot> {
        self.snapshots.get(&(kind, partition))
    }

    /// Tiempo desde la última carga, si la hubo
    pub fn age(&self, kind: EntityKind, partition: Partition) -> Option<Duration> {
        self.snapshots
            .get(&(kind, partition))
            .map(|snapshot| Utc::now() - snapshot.loaded_at)
    }

    pub fn drivers(&self, partition: Partition) -> &[Driver] {
        match self.get(EntityKind::Driver, partition) {
            Some(Roster::Drivers(items)) => items,
            _ => &[],
        }
    }

    pub fn vehicles(&self, partition: Partition) -> &[Vehicle] {
        match self.get(EntityKind::Vehicle, partition) {
            Some(Roster::Vehicles(items)) => items,
            _ => &[],
        }
    }

    pub fn employees(&self) -> &[Employee] {
        match self.get(EntityKind::Employee, Partition::Active) {
            Some(Roster::Employees(items)) => items,
            _ => &[],
        }
    }

    /// Cargar en paralelo los dos rosters activos que necesita un
    /// formulario de emparejamiento; sólo se reemplazan si ambos llegan
    pub async fn load_pairing_candidates(&mut self, kind: PairingKind) -> FleetResult<()> {
        let (left, right) = kind.member_kinds();
        let backend = self.backend.as_ref();

        let (left_roster, right_roster) = futures::try_join!(
            fetch_roster(backend, left, Partition::Active),
            fetch_roster(backend, right, Partition::Active),
        )?;

        self.store(left, Partition::Active, left_roster);
        self.store(right, Partition::Active, right_roster);
        Ok(())
    }

    /// Cargar en paralelo ambas particiones de un tipo
    pub async fn load_partitions(&mut self, kind: EntityKind) -> FleetResult<()> {
        if !kind.has_blocked_partition() {
            return Err(FleetError::Unsupported(format!(
                "{}s have no blocked partition",
                kind
            )));
        }
        let backend = self.backend.as_ref();

        let (active, blocked) = futures::try_join!(
            fetch_roster(backend, kind, Partition::Active),
            fetch_roster(backend, kind, Partition::Blocked),
        )?;

        self.store(kind, Partition::Active, active);
        self.store(kind, Partition::Blocked, blocked);
        Ok(())
    }

    /// Cargar todos los rosters (dashboard)
    pub async fn load_all(&mut self) -> FleetResult<()> {
        let backend = self.backend.as_ref();

        let (drivers, blocked_drivers, vehicles, blocked_vehicles, employees) = futures::try_join!(
            fetch_roster(backend, EntityKind::Driver, Partition::Active),
            fetch_roster(backend, EntityKind::Driver, Partition::Blocked),
            fetch_roster(backend, EntityKind::Vehicle, Partition::Active),
            fetch_roster(backend, EntityKind::Vehicle, Partition::Blocked),
            fetch_roster(backend, EntityKind::Employee, Partition::Active),
        )?;

        self.store(EntityKind::Driver, Partition::Active, drivers);
        self.store(EntityKind::Driver, Partition::Blocked, blocked_drivers);
        self.store(EntityKind::Vehicle, Partition::Active, vehicles);
        self.store(EntityKind::Vehicle, Partition::Blocked, blocked_vehicles);
        self.store(EntityKind::Employee, Partition::Active, employees);
        info!("🔄 Todos los rosters recargados");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{FleetStore, InMemoryBackend};
    use std::sync::Arc;

    fn driver(id: &str, name: &str, blocked: bool) -> Driver {
        let mut driver = Driver::new(id, name);
        driver.blocked = blocked;
        driver
    }

    #[test]
    fn test_sanitize_drops_wrong_partition() {
        let items = vec![driver("1", "A", false), driver("2", "B", true)];
        let clean = sanitize(items, Partition::Active);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].id, EntityId::from("1"));
    }

    #[test]
    fn test_sanitize_keeps_first_position_last_value() {
        let items = vec![
            driver("1", "old", false),
            driver("2", "B", false),
            driver("1", "new", false),
        ];
        let clean = sanitize(items, Partition::Active);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].id, EntityId::from("1"));
        assert_eq!(clean[0].name.as_deref(), Some("new"));
        assert_eq!(clean[1].id, EntityId::from("2"));
    }

    #[tokio::test]
    async fn test_get_before_load_is_empty() {
        let cache = RosterCache::new(Arc::new(InMemoryBackend::demo()));
        assert!(cache.get(EntityKind::Driver, Partition::Active).is_none());
        assert!(cache.drivers(Partition::Active).is_empty());
        assert!(cache.age(EntityKind::Driver, Partition::Active).is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_roster() {
        let backend = Arc::new(InMemoryBackend::with_seed(FleetStore {
            drivers: vec![driver("1", "A", false)],
            ..Default::default()
        }));
        let mut cache = RosterCache::new(backend.clone());
        cache.load(EntityKind::Driver, Partition::Active).await.unwrap();

        backend.set_offline(true);
        let result = cache.load(EntityKind::Driver, Partition::Active).await;
        assert!(matches!(result, Err(FleetError::Fetch(_))));
        assert_eq!(cache.drivers(Partition::Active).len(), 1);
    }

    #[tokio::test]
    async fn test_blocked_employees_are_unsupported() {
        let backend = Arc::new(InMemoryBackend::demo());
        let mut cache = RosterCache::new(backend.clone());
        let result = cache.load(EntityKind::Employee, Partition::Blocked).await;
        assert!(matches!(result, Err(FleetError::Unsupported(_))));
        assert_eq!(backend.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_pairing_candidates_replace_nothing_on_failure() {
        let backend = Arc::new(InMemoryBackend::demo());
        let mut cache = RosterCache::new(backend.clone());
        cache
            .load_pairing_candidates(PairingKind::DriverVehicle)
            .await
            .unwrap();
        let drivers_before = cache.drivers(Partition::Active).to_vec();

        backend.set_offline(true);
        assert!(cache
            .load_pairing_candidates(PairingKind::DriverVehicle)
            .await
            .is_err());
        assert_eq!(cache.drivers(Partition::Active), drivers_before.as_slice());
    }
}
