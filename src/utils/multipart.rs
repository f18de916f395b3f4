//! Lectura de formularios multipart de la consola
//!
//! Separa los campos de texto (que se deserializan al formulario tipado)
//! de los documentos adjuntos.

use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::document::{Document, MAX_DOCUMENT_BYTES};
use crate::utils::errors::{AppError, AppResult};

/// Límite del cuerpo para las rutas con documentos
pub const MAX_UPLOAD_BYTES: usize = 8 * MAX_DOCUMENT_BYTES;

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Map<String, Value>,
    pub documents: Vec<Document>,
}

impl MultipartForm {
    /// Deserializar los campos de texto al formulario tipado
    pub fn into_form<F: DeserializeOwned>(self) -> AppResult<(F, Vec<Document>)> {
        let form = serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| AppError::BadRequest(format!("Invalid form fields: {}", e)))?;
        Ok((form, self.documents))
    }
}

/// Leer todas las partes de un multipart aceptando sólo los documentos
/// listados en `document_fields`
pub async fn read_multipart(
    mut multipart: Multipart,
    document_fields: &[&str],
) -> AppResult<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                if !document_fields.contains(&name.as_str()) {
                    return Err(AppError::BadRequest(format!(
                        "Unexpected document field '{}'",
                        name
                    )));
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid document '{}': {}", name, e)))?;

                // Input de fichero vacío en el navegador
                if bytes.is_empty() && file_name.is_empty() {
                    continue;
                }

                form.documents.push(Document {
                    field: name,
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field '{}': {}", name, e)))?;
                form.fields.insert(name, Value::String(text));
            }
        }
    }

    Ok(form)
}
