//! Interfaz de acceso al backend de flota
//!
//! El backend REST es la fuente de verdad. Cada cache y coordinador recibe
//! una implementación de `FleetBackend` inyectada (nunca un singleton).

use async_trait::async_trait;
use std::sync::Arc;

use crate::dto::{DriverForm, EmployeeForm, VehicleForm};
use crate::models::{Driver, Employee, EntityId, EntityKind, Partition, Vehicle};
use crate::utils::errors::FleetResult;

/// Respuesta de una operación de escritura que llegó al servidor.
///
/// Los fallos de transporte no producen un `BackendReply`: se devuelven
/// como `FleetError::Fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub success: bool,
    pub message: Option<String>,
    pub status: u16,
}

impl BackendReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            status: 200,
        }
    }

    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            status,
        }
    }

    /// Mensaje del servidor o un texto genérico con el status
    pub fn describe(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("backend rejected the request (HTTP {})", self.status))
    }
}

#[async_trait]
pub trait FleetBackend: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn list_drivers(&self, partition: Partition) -> FleetResult<Vec<Driver>>;

    async fn list_vehicles(&self, partition: Partition) -> FleetResult<Vec<Vehicle>>;

    async fn list_employees(&self) -> FleetResult<Vec<Employee>>;

    async fn create_driver(&self, form: &DriverForm) -> FleetResult<BackendReply>;

    async fn create_vehicle(&self, form: &VehicleForm) -> FleetResult<BackendReply>;

    async fn create_employee(&self, form: &EmployeeForm) -> FleetResult<BackendReply>;

    async fn update_driver(&self, id: &EntityId, form: &DriverForm) -> FleetResult<BackendReply>;

    async fn update_vehicle(&self, id: &EntityId, form: &VehicleForm)
        -> FleetResult<BackendReply>;

    async fn set_blocked(
        &self,
        kind: EntityKind,
        id: &EntityId,
        blocked: bool,
    ) -> FleetResult<BackendReply>;

    async fn delete_employee(&self, id: &EntityId) -> FleetResult<BackendReply>;

    async fn pair_driver_vehicle(
        &self,
        driver_id: &EntityId,
        vehicle_id: &EntityId,
    ) -> FleetResult<BackendReply>;

    async fn pair_employee_driver(
        &self,
        employee_id: &EntityId,
        driver_id: &EntityId,
    ) -> FleetResult<BackendReply>;
}

/// Backend compartido entre vistas
pub type SharedBackend = Arc<dyn FleetBackend>;
