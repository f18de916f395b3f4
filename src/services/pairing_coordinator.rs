//! Coordinador de emparejamientos y bloqueos
//!
//! Ejecuta la escritura contra el backend y, sólo si se confirma, recarga
//! los rosters afectados. Nunca reintenta: un fallo deja la cache tal cual.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cache::RosterCache;
use crate::clients::BackendReply;
use crate::models::{EntityId, EntityKind, Pairing, PairingKind, PairingReceipt, Partition};
use crate::services::pairing_locks::PairingLocks;
use crate::utils::errors::{FleetError, FleetResult};

/// Un rechazo es un conflicto si el backend responde 409 o el mensaje dice
/// que alguna entidad ya está emparejada
pub fn is_pairing_conflict(reply: &BackendReply) -> bool {
    reply.status == 409
        || reply
            .message
            .as_deref()
            .map(|m| m.to_lowercase().contains("already paired"))
            .unwrap_or(false)
}

pub struct PairingCoordinator<'a> {
    cache: &'a mut RosterCache,
    locks: Arc<PairingLocks>,
}

impl<'a> PairingCoordinator<'a> {
    pub fn new(cache: &'a mut RosterCache, locks: Arc<PairingLocks>) -> Self {
        Self { cache, locks }
    }

    pub async fn pair_driver_vehicle(
        &mut self,
        driver_id: &EntityId,
        vehicle_id: &EntityId,
    ) -> FleetResult<PairingReceipt> {
        let pairing = Pairing::DriverVehicle {
            driver_id: driver_id.clone(),
            vehicle_id: vehicle_id.clone(),
        };
        self.pair(pairing).await
    }

    pub async fn pair_employee_driver(
        &mut self,
        employee_id: &EntityId,
        driver_id: &EntityId,
    ) -> FleetResult<PairingReceipt> {
        let pairing = Pairing::EmployeeDriver {
            employee_id: employee_id.clone(),
            driver_id: driver_id.clone(),
        };
        self.pair(pairing).await
    }

    async fn pair(&mut self, pairing: Pairing) -> FleetResult<PairingReceipt> {
        // Se mantiene hasta terminar la recarga
        let _guard = self.locks.try_acquire(&pairing.members())?;
        let backend = Arc::clone(self.cache.backend());

        info!("🔗 Emparejando {:?}", pairing);
        let reply = match &pairing {
            Pairing::DriverVehicle {
                driver_id,
                vehicle_id,
            } => backend.pair_driver_vehicle(driver_id, vehicle_id).await?,
            Pairing::EmployeeDriver {
                employee_id,
                driver_id,
            } => backend.pair_employee_driver(employee_id, driver_id).await?,
        };

        if !reply.success {
            return Err(if is_pairing_conflict(&reply) {
                FleetError::PairingConflict(reply.describe())
            } else {
                FleetError::Pairing(reply.describe())
            });
        }

        self.reload_after_commit(pairing.kind()).await?;
        info!("✅ Emparejamiento confirmado: {:?}", pairing);

        Ok(PairingReceipt {
            pairing,
            message: reply.message,
        })
    }

    async fn reload_after_commit(&mut self, kind: PairingKind) -> FleetResult<()> {
        self.cache.load_pairing_candidates(kind).await.map_err(|e| {
            error!(
                "❌ Emparejamiento {:?} confirmado pero la recarga falló: {}",
                kind, e
            );
            e
        })
    }

    /// Bloquear o desbloquear; la entidad cambia de partición así que se
    /// recargan ambas
    pub async fn set_blocked(
        &mut self,
        kind: EntityKind,
        id: &EntityId,
        blocked: bool,
    ) -> FleetResult<BackendReply> {
        if !kind.has_blocked_partition() {
            return Err(FleetError::Unsupported(format!("{}s cannot be blocked", kind)));
        }

        let backend = Arc::clone(self.cache.backend());
        let reply = backend.set_blocked(kind, id, blocked).await?;
        if !reply.success {
            return Err(FleetError::Block(reply.describe()));
        }

        info!(
            "🚫 {} {} {}",
            kind,
            id,
            if blocked { "bloqueado" } else { "desbloqueado" }
        );
        self.cache.load_partitions(kind).await?;
        Ok(reply)
    }

    /// Borrar un empleado; excluye emparejamientos sobre él mientras dura
    pub async fn delete_employee(&mut self, id: &EntityId) -> FleetResult<BackendReply> {
        let _guard = self.locks.try_acquire(&[(EntityKind::Employee, id)])?;

        let backend = Arc::clone(self.cache.backend());
        let reply = backend.delete_employee(id).await?;
        if !reply.success {
            warn!("⚠️ Borrado de empleado {} rechazado", id);
            return Err(FleetError::Delete(reply.describe()));
        }

        info!("🗑️ Empleado {} borrado", id);
        self.cache
            .load(EntityKind::Employee, Partition::Active)
            .await?;
        Ok(reply)
    }
}
