//! Altas y ediciones de conductores, vehículos y empleados
//!
//! Valida en local antes de tocar la red; tras una escritura confirmada
//! recarga la partición activa del tipo afectado.

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::cache::RosterCache;
use crate::clients::BackendReply;
use crate::dto::{DriverForm, EmployeeForm, VehicleForm};
use crate::models::{EntityId, EntityKind, Partition};
use crate::utils::errors::{FleetError, FleetResult};

pub struct RecordService<'a> {
    cache: &'a mut RosterCache,
}

impl<'a> RecordService<'a> {
    pub fn new(cache: &'a mut RosterCache) -> Self {
        Self { cache }
    }

    async fn commit(&mut self, kind: EntityKind, reply: BackendReply) -> FleetResult<BackendReply> {
        if !reply.success {
            warn!("⚠️ Registro de {} rechazado: {}", kind, reply.describe());
            return Err(FleetError::Record(reply.describe()));
        }
        self.cache.load(kind, Partition::Active).await?;
        Ok(reply)
    }

    pub async fn create_driver(&mut self, form: &DriverForm) -> FleetResult<BackendReply> {
        form.validate()?;
        let backend = Arc::clone(self.cache.backend());
        info!(
            "📝 Alta de conductor con {} documentos",
            form.documents.len()
        );
        let reply = backend.create_driver(form).await?;
        self.commit(EntityKind::Driver, reply).await
    }

    pub async fn create_vehicle(&mut self, form: &VehicleForm) -> FleetResult<BackendReply> {
        form.validate()?;
        let backend = Arc::clone(self.cache.backend());
        info!("📝 Alta de vehículo {}", form.vehicle_number);
        let reply = backend.create_vehicle(form).await?;
        self.commit(EntityKind::Vehicle, reply).await
    }

    pub async fn create_employee(&mut self, form: &EmployeeForm) -> FleetResult<BackendReply> {
        form.validate()?;
        let backend = Arc::clone(self.cache.backend());
        info!("📝 Alta de empleado {}", form.email);
        let reply = backend.create_employee(form).await?;
        self.commit(EntityKind::Employee, reply).await
    }

    pub async fn update_driver(
        &mut self,
        id: &EntityId,
        form: &DriverForm,
    ) -> FleetResult<BackendReply> {
        form.validate()?;
        let backend = Arc::clone(self.cache.backend());
        info!("✏️ Edición de conductor {}", id);
        let reply = backend.update_driver(id, form).await?;
        self.commit(EntityKind::Driver, reply).await
    }

    pub async fn update_vehicle(
        &mut self,
        id: &EntityId,
        form: &VehicleForm,
    ) -> FleetResult<BackendReply> {
        form.validate()?;
        let backend = Arc::clone(self.cache.backend());
        info!("✏️ Edición de vehículo {}", id);
        let reply = backend.update_vehicle(id, form).await?;
        self.commit(EntityKind::Vehicle, reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InMemoryBackend;

    #[tokio::test]
    async fn test_invalid_form_sends_no_request() {
        let backend = Arc::new(InMemoryBackend::demo());
        let mut cache = RosterCache::new(backend.clone());
        let form = VehicleForm {
            vehicle_number: "mh12ab1234".to_string(),
            ..Default::default()
        };

        let result = RecordService::new(&mut cache).create_vehicle(&form).await;
        let Err(FleetError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.field_errors().contains_key("vehicle_number"));
        assert_eq!(backend.mutation_calls(), 0);
        assert_eq!(backend.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_created_employee_shows_up_after_reload() {
        let backend = Arc::new(InMemoryBackend::demo());
        let mut cache = RosterCache::new(backend.clone());
        let form = EmployeeForm {
            name: "Kiran Desai".to_string(),
            phone: "9000000001".to_string(),
            gender: "male".to_string(),
            email: "kiran@fleet.in".to_string(),
            ..Default::default()
        };

        RecordService::new(&mut cache)
            .create_employee(&form)
            .await
            .unwrap();
        assert!(cache
            .employees()
            .iter()
            .any(|e| e.email.as_deref() == Some("kiran@fleet.in")));
    }
}
