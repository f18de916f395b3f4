use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Document;
use crate::utils::validation::{
    validate_documents, validate_iso_date, validate_not_blank, validate_phone,
};

// Formulario de alta y edición (PUT de registro completo) de un conductor
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DriverForm {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(custom = "validate_phone")]
    pub mobile: String,

    #[validate(custom = "validate_iso_date")]
    pub date_of_birth: String,

    #[validate(custom = "validate_not_blank")]
    pub license_id: String,

    #[validate(custom = "validate_iso_date")]
    pub license_expiry_date: String,

    #[validate(custom = "validate_not_blank")]
    pub id_proof_type: String,

    // Fotos de licencia, prueba de identidad, PCC... viajan como multipart
    #[serde(skip)]
    #[validate(custom = "validate_documents")]
    pub documents: Vec<Document>,
}

impl DriverForm {
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }
}
