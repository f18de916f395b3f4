//! Modelo de Vehicle
//!
//! Vehículo (cab) tal como lo devuelve el backend en los listados.
//! El flag `blacklisted` determina la partición del roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{date_text, EntityId, EntityKind, RosterEntity};

/// Campos de búsqueda por defecto en la vista de vehículos
pub const VEHICLE_SEARCH_FIELDS: &[&str] = &["vehicle_number", "brand", "category"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: EntityId,
    /// Matrícula, ej. `MH12AB1234`
    pub vehicle_number: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model_type: Option<String>,
    pub fuel_type: Option<String>,
    pub ownership_type: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub insurance_valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub blacklisted: bool,
    #[serde(default)]
    pub paired: bool,
}

impl Vehicle {
    pub fn new(id: impl Into<EntityId>, vehicle_number: &str) -> Self {
        Self {
            id: id.into(),
            vehicle_number: Some(vehicle_number.to_string()),
            category: None,
            brand: None,
            model_type: None,
            fuel_type: None,
            ownership_type: None,
            registration_date: None,
            insurance_valid_to: None,
            blacklisted: false,
            paired: false,
        }
    }
}

impl RosterEntity for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_blocked(&self) -> bool {
        self.blacklisted
    }

    fn is_paired(&self) -> bool {
        self.paired
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "vehicle_number" => self.vehicle_number.clone(),
            "category" => self.category.clone(),
            "brand" => self.brand.clone(),
            "model_type" => self.model_type.clone(),
            "fuel_type" => self.fuel_type.clone(),
            "ownership_type" => self.ownership_type.clone(),
            "registration_date" => date_text(self.registration_date),
            "insurance_valid_to" => date_text(self.insurance_valid_to),
            "blacklisted" => Some(self.blacklisted.to_string()),
            "paired" => Some(self.paired.to_string()),
            _ => None,
        }
    }
}
