//! Documentos adjuntos a los formularios de alta
//!
//! Fotos, licencias, certificados de registro, seguros... Se envían al
//! backend como partes multipart.

/// Tamaño máximo por documento (5 MiB)
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Partes documentales que acepta el alta de conductores
pub const DRIVER_DOCUMENT_FIELDS: &[&str] = &[
    "driver_photo",
    "license_front_photo",
    "license_back_photo",
    "id_proof_front_photo",
    "id_proof_back_photo",
    "pcc_form",
];

/// Partes documentales que acepta el alta de vehículos
pub const VEHICLE_DOCUMENT_FIELDS: &[&str] = &[
    "insurance_copy",
    "registration_certificate_front",
    "registration_certificate_back",
    "vehicle_photo",
];

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Document {
    /// Nombre de la parte multipart (ej. `insurance_copy`)
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(field: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            field: field.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
