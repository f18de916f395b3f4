//! Modelo de Pairing
//!
//! Asociación registrada en el servidor entre conductor↔vehículo o
//! empleado↔conductor. Marca a ambos miembros como no disponibles.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};

/// Tipo de emparejamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingKind {
    DriverVehicle,
    EmployeeDriver,
}

impl PairingKind {
    /// Tipos de entidad que participan, en el orden (izquierda, derecha)
    pub fn member_kinds(self) -> (EntityKind, EntityKind) {
        match self {
            PairingKind::DriverVehicle => (EntityKind::Driver, EntityKind::Vehicle),
            PairingKind::EmployeeDriver => (EntityKind::Employee, EntityKind::Driver),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pairing {
    DriverVehicle {
        driver_id: EntityId,
        vehicle_id: EntityId,
    },
    EmployeeDriver {
        employee_id: EntityId,
        driver_id: EntityId,
    },
}

impl Pairing {
    pub fn kind(&self) -> PairingKind {
        match self {
            Pairing::DriverVehicle { .. } => PairingKind::DriverVehicle,
            Pairing::EmployeeDriver { .. } => PairingKind::EmployeeDriver,
        }
    }

    /// Los dos miembros del emparejamiento con su tipo
    pub fn members(&self) -> [(EntityKind, &EntityId); 2] {
        match self {
            Pairing::DriverVehicle {
                driver_id,
                vehicle_id,
            } => [
                (EntityKind::Driver, driver_id),
                (EntityKind::Vehicle, vehicle_id),
            ],
            Pairing::EmployeeDriver {
                employee_id,
                driver_id,
            } => [
                (EntityKind::Employee, employee_id),
                (EntityKind::Driver, driver_id),
            ],
        }
    }

    pub fn involves(&self, kind: EntityKind, id: &EntityId) -> bool {
        self.members()
            .iter()
            .any(|(member_kind, member_id)| *member_kind == kind && *member_id == id)
    }

    /// El otro miembro, si `(kind, id)` participa en el emparejamiento
    pub fn partner_of(&self, kind: EntityKind, id: &EntityId) -> Option<(EntityKind, &EntityId)> {
        let [left, right] = self.members();
        if left.0 == kind && left.1 == id {
            Some(right)
        } else if right.0 == kind && right.1 == id {
            Some(left)
        } else {
            None
        }
    }
}

/// Resultado confirmado de un emparejamiento
#[derive(Debug, Clone, Serialize)]
pub struct PairingReceipt {
    pub pairing: Pairing,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_of() {
        let pairing = Pairing::DriverVehicle {
            driver_id: "d1".into(),
            vehicle_id: "v1".into(),
        };
        let partner = pairing.partner_of(EntityKind::Driver, &"d1".into());
        assert_eq!(partner, Some((EntityKind::Vehicle, &EntityId::from("v1"))));
        assert!(pairing.partner_of(EntityKind::Vehicle, &"d1".into()).is_none());
    }
}
