//! Modelo de Employee
//!
//! Los empleados no se bloquean; se consideran emparejados cuando tienen
//! un conductor asignado.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind, RosterEntity};

/// Campos de búsqueda por defecto en la vista de empleados
pub const EMPLOYEE_SEARCH_FIELDS: &[&str] = &["name", "email", "phone"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub shift_time: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub driver_id: Option<EntityId>,
}

impl Employee {
    pub fn new(id: impl Into<EntityId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: Some(name.to_string()),
            phone: None,
            gender: None,
            email: None,
            shift_time: None,
            pickup_location: None,
            drop_location: None,
            driver_id: None,
        }
    }
}

impl RosterEntity for Employee {
    const KIND: EntityKind = EntityKind::Employee;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_blocked(&self) -> bool {
        false
    }

    fn is_paired(&self) -> bool {
        self.driver_id.is_some()
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "name" => self.name.clone(),
            "phone" => self.phone.clone(),
            "gender" => self.gender.clone(),
            "email" => self.email.clone(),
            "shift_time" => self.shift_time.clone(),
            "pickup_location" => self.pickup_location.clone(),
            "drop_location" => self.drop_location.clone(),
            "driver_id" => self.driver_id.as_ref().map(ToString::to_string),
            _ => None,
        }
    }
}
