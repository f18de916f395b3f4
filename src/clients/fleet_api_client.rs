//! Cliente HTTP para el backend REST de flota
//!
//! Listados: `{ success, data: [...] }`. Escrituras: `{ success, message?, data? }`.
//! Los formularios con documentos se envían como multipart; el resto como JSON.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;

use super::backend::{BackendReply, FleetBackend};
use crate::dto::{ApiResponse, DriverForm, EmployeeForm, VehicleForm};
use crate::models::{Document, Driver, Employee, EntityId, EntityKind, Partition, Vehicle};
use crate::utils::errors::{FleetError, FleetResult};

/// Cliente HTTP del backend de flota
#[derive(Debug, Clone)]
pub struct FleetApiClient {
    client: Client,
    base_url: String,
}

impl FleetApiClient {
    /// Crear nuevo cliente con URL base configurable
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FleetResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FleetError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Id codificado como un único segmento de path
    fn segment(id: &EntityId) -> Cow<'_, str> {
        urlencoding::encode(id.as_str())
    }

    fn collection_path(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Driver => "/drivers",
            EntityKind::Vehicle => "/vehicles",
            EntityKind::Employee => "/employees",
        }
    }

    fn list_path(kind: EntityKind, partition: Partition) -> String {
        match partition {
            Partition::Active => Self::collection_path(kind).to_string(),
            Partition::Blocked => format!("{}/blocked", Self::collection_path(kind)),
        }
    }

    /// GET de un listado; cualquier desviación del envelope es un FetchError
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> FleetResult<Vec<T>> {
        let url = self.url(path);
        log::debug!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ Listado {} falló con status {}", path, status);
            return Err(FleetError::Fetch(format!("GET {} returned HTTP {}", path, status)));
        }

        let body = response.text().await?;
        let envelope: ApiResponse<Vec<T>> = serde_json::from_str(&body).map_err(|e| {
            log::error!("❌ Payload mal formado en {}: {}", path, e);
            FleetError::Fetch(format!("Malformed payload from {}: {}", path, e))
        })?;

        if !envelope.success {
            return Err(FleetError::Fetch(format!(
                "GET {} answered success=false: {}",
                path,
                envelope.message.unwrap_or_default()
            )));
        }

        let items = envelope
            .data
            .ok_or_else(|| FleetError::Fetch(format!("GET {} answered without a data list", path)))?;

        log::info!("📥 {} elementos recibidos de {}", items.len(), path);
        Ok(items)
    }

    /// Enviar una escritura e interpretar su envelope.
    ///
    /// Un status no-2xx con envelope legible es un rechazo del servidor
    /// (`success = false`); sin envelope legible es un FetchError.
    async fn send_mutation(&self, request: RequestBuilder, label: &str) -> FleetResult<BackendReply> {
        let response = request.header("Accept", "application/json").send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
            Ok(envelope) => {
                let reply = BackendReply {
                    success: envelope.success && status.is_success(),
                    message: envelope.message,
                    status: status.as_u16(),
                };
                if reply.success {
                    log::info!("✅ {} confirmado por el backend", label);
                } else {
                    log::warn!("⚠️ {} rechazado ({}): {}", label, status, reply.describe());
                }
                Ok(reply)
            }
            Err(e) if status.is_success() => Err(FleetError::Fetch(format!(
                "Malformed payload for {}: {}",
                label, e
            ))),
            Err(_) => Err(FleetError::Fetch(format!("{} returned HTTP {}", label, status))),
        }
    }

    async fn send_form<F: Serialize + Sync>(
        &self,
        request: RequestBuilder,
        form: &F,
        documents: &[Document],
        label: &str,
    ) -> FleetResult<BackendReply> {
        let request = if documents.is_empty() {
            request.json(form)
        } else {
            request.multipart(multipart_form(form, documents)?)
        };
        self.send_mutation(request, label).await
    }
}

/// Construir el multipart: cada campo de texto como parte simple y cada
/// documento como fichero
fn multipart_form<F: Serialize>(form: &F, documents: &[Document]) -> FleetResult<Form> {
    let fields = serde_json::to_value(form)
        .map_err(|e| FleetError::Record(format!("Cannot encode form: {}", e)))?;

    let mut multipart = Form::new();
    if let serde_json::Value::Object(map) = fields {
        for (name, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(text) => multipart = multipart.text(name, text),
                other => multipart = multipart.text(name, other.to_string()),
            }
        }
    }

    for document in documents {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&document.content_type)
            .map_err(|e| {
                FleetError::Record(format!("Invalid content type for {}: {}", document.field, e))
            })?;
        multipart = multipart.part(document.field.clone(), part);
    }

    Ok(multipart)
}

#[async_trait]
impl FleetBackend for FleetApiClient {
    fn backend_tag(&self) -> &'static str {
        "http"
    }

    async fn list_drivers(&self, partition: Partition) -> FleetResult<Vec<Driver>> {
        self.fetch_list(&Self::list_path(EntityKind::Driver, partition))
            .await
    }

    async fn list_vehicles(&self, partition: Partition) -> FleetResult<Vec<Vehicle>> {
        self.fetch_list(&Self::list_path(EntityKind::Vehicle, partition))
            .await
    }

    async fn list_employees(&self) -> FleetResult<Vec<Employee>> {
        self.fetch_list(&Self::list_path(EntityKind::Employee, Partition::Active))
            .await
    }

    async fn create_driver(&self, form: &DriverForm) -> FleetResult<BackendReply> {
        // El alta de conductores siempre es multipart, con o sin documentos
        let request = self
            .client
            .post(self.url("/drivers"))
            .multipart(multipart_form(form, &form.documents)?);
        self.send_mutation(request, "alta de conductor").await
    }

    async fn create_vehicle(&self, form: &VehicleForm) -> FleetResult<BackendReply> {
        let request = self.client.post(self.url("/vehicles"));
        self.send_form(request, form, &form.documents, "alta de vehículo")
            .await
    }

    async fn create_employee(&self, form: &EmployeeForm) -> FleetResult<BackendReply> {
        let request = self.client.post(self.url("/employees")).json(form);
        self.send_mutation(request, "alta de empleado").await
    }

    async fn update_driver(&self, id: &EntityId, form: &DriverForm) -> FleetResult<BackendReply> {
        let path = format!("/drivers/{}", Self::segment(id));
        let request = self.client.put(self.url(&path));
        self.send_form(request, form, &form.documents, "edición de conductor")
            .await
    }

    async fn update_vehicle(
        &self,
        id: &EntityId,
        form: &VehicleForm,
    ) -> FleetResult<BackendReply> {
        let path = format!("/vehicles/{}", Self::segment(id));
        let request = self.client.put(self.url(&path));
        self.send_form(request, form, &form.documents, "edición de vehículo")
            .await
    }

    async fn set_blocked(
        &self,
        kind: EntityKind,
        id: &EntityId,
        blocked: bool,
    ) -> FleetResult<BackendReply> {
        if !kind.has_blocked_partition() {
            return Err(FleetError::Unsupported(format!("{}s cannot be blocked", kind)));
        }
        let action = if blocked { "block" } else { "unblock" };
        let path = format!(
            "{}/{}/{}",
            Self::collection_path(kind),
            Self::segment(id),
            action
        );
        let request = self.client.put(self.url(&path));
        self.send_mutation(request, &format!("{} de {} {}", action, kind, id))
            .await
    }

    async fn delete_employee(&self, id: &EntityId) -> FleetResult<BackendReply> {
        let path = format!("/employees/{}", Self::segment(id));
        let request = self.client.delete(self.url(&path));
        self.send_mutation(request, &format!("borrado de empleado {}", id))
            .await
    }

    async fn pair_driver_vehicle(
        &self,
        driver_id: &EntityId,
        vehicle_id: &EntityId,
    ) -> FleetResult<BackendReply> {
        let path = format!(
            "/pairings/{}/{}",
            Self::segment(vehicle_id),
            Self::segment(driver_id)
        );
        let request = self.client.post(self.url(&path));
        self.send_mutation(request, "emparejamiento conductor-vehículo")
            .await
    }

    async fn pair_employee_driver(
        &self,
        employee_id: &EntityId,
        driver_id: &EntityId,
    ) -> FleetResult<BackendReply> {
        let path = format!(
            "/pairings/employees/{}/{}",
            Self::segment(employee_id),
            Self::segment(driver_id)
        );
        let request = self.client.post(self.url(&path));
        self.send_mutation(request, "emparejamiento empleado-conductor")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_paths() {
        assert_eq!(
            FleetApiClient::list_path(EntityKind::Driver, Partition::Active),
            "/drivers"
        );
        assert_eq!(
            FleetApiClient::list_path(EntityKind::Vehicle, Partition::Blocked),
            "/vehicles/blocked"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            FleetApiClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/drivers"), "http://localhost:8080/drivers");
    }

    #[test]
    fn test_ids_are_encoded_as_single_segments() {
        assert_eq!(FleetApiClient::segment(&"42".into()), "42");
        assert_eq!(FleetApiClient::segment(&"5#".into()), "5%23");
        assert_eq!(FleetApiClient::segment(&"a/b?x".into()), "a%2Fb%3Fx");
    }

    #[test]
    fn test_envelope_without_success_is_malformed() {
        let parsed = serde_json::from_str::<ApiResponse<Vec<Driver>>>(r#"{"data": []}"#);
        assert!(parsed.is_err());
    }
}
