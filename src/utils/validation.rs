//! Utilidades de validación
//!
//! Validadores `custom` para los formularios de alta y edición. Todos
//! devuelven un `ValidationError` con mensaje listo para mostrarse junto
//! al campo.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::document::{Document, MAX_DOCUMENT_BYTES};

lazy_static! {
    /// Dos letras + dos dígitos + una o dos letras + cuatro dígitos
    pub static ref VEHICLE_NUMBER_REGEX: Regex =
        Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z]{1,2}[0-9]{4}$").unwrap();
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

fn invalid(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required".into());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha ISO (YYYY-MM-DD)
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ValidationError> {
    validate_not_blank(value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = invalid("date", "Date must use the YYYY-MM-DD format", value);
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    parse_iso_date(value).map(|_| ())
}

/// Validar formato de matrícula (ej. `MH12AB1234`)
pub fn validate_vehicle_number(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !VEHICLE_NUMBER_REGEX.is_match(value) {
        return Err(invalid(
            "vehicle_number",
            "Vehicle number must look like MH12AB1234",
            value,
        ));
    }
    Ok(())
}

/// Validar teléfono de 10 dígitos
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !PHONE_REGEX.is_match(value) {
        return Err(invalid("phone", "Phone number must be 10 digits", value));
    }
    Ok(())
}

/// Validar formato de email (básico)
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !EMAIL_REGEX.is_match(value) {
        return Err(invalid("email", "Invalid email format", value));
    }
    Ok(())
}

/// Validar los documentos adjuntos: nombre de fichero y tamaño máximo
pub fn validate_documents(documents: &[Document]) -> Result<(), ValidationError> {
    for document in documents {
        if document.file_name.trim().is_empty() {
            return Err(invalid(
                "document_name",
                "Every document needs a file name",
                &document.field,
            ));
        }
        if document.size() > MAX_DOCUMENT_BYTES {
            let mut error = invalid(
                "document_size",
                "Documents must be smaller than 5MB",
                &document.field,
            );
            error.add_param("size".into(), &document.size());
            return Err(error);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vehicle_number() {
        assert!(validate_vehicle_number("MH12AB1234").is_ok());
        assert!(validate_vehicle_number("KA01A1234").is_ok());
        assert!(validate_vehicle_number("mh12ab1234").is_err());
        assert!(validate_vehicle_number("MH1AB1234").is_err());
        assert!(validate_vehicle_number("").is_err());
    }

    #[test]
    fn test_validate_iso_date() {
        assert!(validate_iso_date("2024-01-15").is_ok());
        assert!(validate_iso_date("2024/01/15").is_err());
        assert!(validate_iso_date("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("98765").is_err());
        assert!(validate_phone("98765432101").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ops@fleet.in").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
        assert!(validate_email("a b@fleet.in").is_err());
    }

    #[test]
    fn test_validate_documents_size() {
        let small = Document::new("vehicle_photo", "cab.jpg", "image/jpeg", vec![0; 16]);
        let large = Document::new(
            "vehicle_photo",
            "cab.jpg",
            "image/jpeg",
            vec![0; MAX_DOCUMENT_BYTES + 1],
        );
        assert!(validate_documents(&[small]).is_ok());
        assert!(validate_documents(&[large]).is_err());
    }
}
