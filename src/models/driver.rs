//! Modelo de Driver
//!
//! Conductor tal como lo devuelve el backend en los listados.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{date_text, EntityId, EntityKind, RosterEntity};

/// Campos de búsqueda por defecto en la vista de conductores
pub const DRIVER_SEARCH_FIELDS: &[&str] = &["name", "mobile", "license_id"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: EntityId,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub license_id: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub id_proof_type: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    /// true una vez asociado a un vehículo
    #[serde(default)]
    pub paired: bool,
}

impl Driver {
    /// Conductor mínimo, útil para sembrar backends en memoria
    pub fn new(id: impl Into<EntityId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: Some(name.to_string()),
            mobile: None,
            date_of_birth: None,
            license_id: None,
            license_expiry_date: None,
            id_proof_type: None,
            blocked: false,
            paired: false,
        }
    }
}

impl RosterEntity for Driver {
    const KIND: EntityKind = EntityKind::Driver;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_blocked(&self) -> bool {
        self.blocked
    }

    fn is_paired(&self) -> bool {
        self.paired
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "name" => self.name.clone(),
            "mobile" => self.mobile.clone(),
            "date_of_birth" => date_text(self.date_of_birth),
            "license_id" => self.license_id.clone(),
            "license_expiry_date" => date_text(self.license_expiry_date),
            "id_proof_type" => self.id_proof_type.clone(),
            "blocked" => Some(self.blocked.to_string()),
            "paired" => Some(self.paired.to_string()),
            _ => None,
        }
    }
}
