//! Registro single-flight de emparejamientos
//!
//! Mientras un emparejamiento que referencia una entidad está en curso,
//! cualquier otro intento sobre esa entidad se rechaza de inmediato. No hay
//! cola: el llamador reintenta cuando quiera.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::{EntityId, EntityKind};
use crate::utils::errors::{FleetError, FleetResult};

type LockKey = (EntityKind, EntityId);

#[derive(Debug, Default)]
pub struct PairingLocks {
    in_flight: Mutex<HashSet<LockKey>>,
}

/// Libera las entidades al salir de scope
#[derive(Debug)]
pub struct PairingGuard {
    locks: Arc<PairingLocks>,
    keys: Vec<LockKey>,
}

impl PairingLocks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn entries(&self) -> MutexGuard<'_, HashSet<LockKey>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Reservar todas las entidades o ninguna
    pub fn try_acquire(
        self: &Arc<Self>,
        members: &[(EntityKind, &EntityId)],
    ) -> FleetResult<PairingGuard> {
        let mut entries = self.entries();

        if let Some((kind, id)) = members
            .iter()
            .find(|(kind, id)| entries.contains(&(*kind, (*id).clone())))
        {
            return Err(FleetError::PairingInProgress(format!(
                "{} {} has a pairing in progress",
                kind, id
            )));
        }

        let keys: Vec<LockKey> = members
            .iter()
            .map(|(kind, id)| (*kind, (*id).clone()))
            .collect();
        entries.extend(keys.iter().cloned());

        Ok(PairingGuard {
            locks: Arc::clone(self),
            keys,
        })
    }

    pub fn is_in_progress(&self, kind: EntityKind, id: &EntityId) -> bool {
        self.entries().contains(&(kind, id.clone()))
    }

    pub fn in_flight_count(&self) -> usize {
        self.entries().len()
    }
}

impl Drop for PairingGuard {
    fn drop(&mut self) {
        let mut entries = self.locks.entries();
        for key in &self.keys {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_attempt_on_same_entity_is_rejected() {
        let locks = PairingLocks::new();
        let driver: EntityId = "d1".into();
        let vehicle: EntityId = "v1".into();
        let other_vehicle: EntityId = "v2".into();

        let guard = locks
            .try_acquire(&[(EntityKind::Driver, &driver), (EntityKind::Vehicle, &vehicle)])
            .unwrap();

        let second = locks.try_acquire(&[
            (EntityKind::Driver, &driver),
            (EntityKind::Vehicle, &other_vehicle),
        ]);
        assert!(matches!(second, Err(FleetError::PairingInProgress(_))));
        // Todo o nada: v2 no quedó reservado
        assert!(!locks.is_in_progress(EntityKind::Vehicle, &other_vehicle));

        drop(guard);
        assert_eq!(locks.in_flight_count(), 0);
        assert!(locks
            .try_acquire(&[(EntityKind::Driver, &driver)])
            .is_ok());
    }

    #[test]
    fn test_same_id_different_kind_is_independent() {
        let locks = PairingLocks::new();
        let id: EntityId = "7".into();
        let _guard = locks.try_acquire(&[(EntityKind::Driver, &id)]).unwrap();
        assert!(locks.try_acquire(&[(EntityKind::Vehicle, &id)]).is_ok());
    }
}
