use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Document;
use crate::utils::validation::{
    validate_documents, validate_iso_date, validate_not_blank, validate_vehicle_number,
};

// Formulario de alta y edición de un vehículo
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleForm {
    #[validate(custom = "validate_vehicle_number")]
    pub vehicle_number: String,

    #[validate(custom = "validate_not_blank")]
    pub category: String,

    #[validate(custom = "validate_not_blank")]
    pub brand: String,

    #[validate(custom = "validate_not_blank")]
    pub model_type: String,

    #[validate(custom = "validate_not_blank")]
    pub fuel_type: String,

    // Propio, alquilado, de un tercero... texto libre
    pub ownership_type: Option<String>,

    #[validate(custom = "validate_iso_date")]
    pub registration_date: String,

    #[validate(custom = "validate_iso_date")]
    pub insurance_valid_to: String,

    #[serde(skip)]
    #[validate(custom = "validate_documents")]
    pub documents: Vec<Document>,
}

impl VehicleForm {
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }
}
