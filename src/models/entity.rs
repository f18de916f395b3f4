//! Tipos comunes de las entidades del roster
//!
//! Identificadores, tipos de entidad, particiones (activo/bloqueado) y el
//! trait `RosterEntity` que comparten conductores, vehículos y empleados.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identificador de una entidad asignado por el backend.
///
/// El backend puede enviar el id como string o como número; ambos se
/// normalizan a su representación textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawEntityId::deserialize(deserializer)? {
            RawEntityId::Text(value) => EntityId(value),
            RawEntityId::Signed(value) => EntityId(value.to_string()),
            RawEntityId::Unsigned(value) => EntityId(value.to_string()),
        })
    }
}

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Tipo de entidad gestionada por la consola
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Driver,
    Vehicle,
    Employee,
}

impl EntityKind {
    /// Los empleados no tienen partición de bloqueados
    pub fn has_blocked_partition(self) -> bool {
        !matches!(self, EntityKind::Employee)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Driver => "driver",
            EntityKind::Vehicle => "vehicle",
            EntityKind::Employee => "employee",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partición del roster: activos o bloqueados/en lista negra
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    #[default]
    Active,
    Blocked,
}

impl Partition {
    /// Indica si una entidad con ese flag de bloqueo pertenece a la partición
    pub fn admits(self, blocked: bool) -> bool {
        match self {
            Partition::Active => !blocked,
            Partition::Blocked => blocked,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Active => "active",
            Partition::Blocked => "blocked",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contrato común de las entidades que viven en un roster
pub trait RosterEntity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &EntityId;

    /// Bloqueado (conductor) o en lista negra (vehículo)
    fn is_blocked(&self) -> bool;

    /// Ya forma parte de un emparejamiento
    fn is_paired(&self) -> bool;

    /// Valor textual de un campo por nombre canónico; `None` si falta
    fn field_value(&self, field: &str) -> Option<String>;
}

pub(crate) fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_accepts_numbers_and_strings() {
        let numeric: EntityId = serde_json::from_str("42").unwrap();
        let textual: EntityId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(numeric, textual);
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "\"42\"");
    }

    #[test]
    fn test_partition_admits() {
        assert!(Partition::Active.admits(false));
        assert!(!Partition::Active.admits(true));
        assert!(Partition::Blocked.admits(true));
    }
}
