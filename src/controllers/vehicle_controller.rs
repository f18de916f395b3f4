use crate::cache::RosterCache;
use crate::dto::roster_dto::{RosterQuery, RosterView};
use crate::dto::{ApiResponse, VehicleForm};
use crate::models::vehicle::VEHICLE_SEARCH_FIELDS;
use crate::models::{EntityId, EntityKind, Partition, Vehicle};
use crate::services::{PairingCoordinator, PairingLocks, RecordService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;

use super::roster_view;

pub struct VehicleController {
    cache: RosterCache,
    locks: Arc<PairingLocks>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cache: state.roster_cache(),
            locks: Arc::clone(&state.pairing_locks),
        }
    }

    fn view(&self, partition: Partition, query: Option<String>) -> RosterView<Vehicle> {
        roster_view(
            &self.cache,
            self.cache.vehicles(partition),
            partition,
            query,
            VEHICLE_SEARCH_FIELDS,
        )
    }

    pub async fn list(&mut self, query: RosterQuery) -> Result<RosterView<Vehicle>, AppError> {
        let partition = query.partition.unwrap_or_default();
        self.cache.load(EntityKind::Vehicle, partition).await?;
        Ok(self.view(partition, query.q))
    }

    pub async fn create(
        &mut self,
        form: VehicleForm,
    ) -> Result<ApiResponse<RosterView<Vehicle>>, AppError> {
        let reply = RecordService::new(&mut self.cache)
            .create_vehicle(&form)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.view(Partition::Active, None),
            reply
                .message
                .unwrap_or_else(|| "Vehículo creado exitosamente".to_string()),
        ))
    }

    pub async fn update(
        &mut self,
        id: EntityId,
        form: VehicleForm,
    ) -> Result<ApiResponse<RosterView<Vehicle>>, AppError> {
        let reply = RecordService::new(&mut self.cache)
            .update_vehicle(&id, &form)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.view(Partition::Active, None),
            reply
                .message
                .unwrap_or_else(|| "Vehículo actualizado exitosamente".to_string()),
        ))
    }

    /// Poner o quitar de la lista negra
    pub async fn set_blocked(
        &mut self,
        id: EntityId,
        blocked: bool,
    ) -> Result<ApiResponse<RosterView<Vehicle>>, AppError> {
        let reply = PairingCoordinator::new(&mut self.cache, Arc::clone(&self.locks))
            .set_blocked(EntityKind::Vehicle, &id, blocked)
            .await?;

        let partition = if blocked {
            Partition::Blocked
        } else {
            Partition::Active
        };
        Ok(ApiResponse::success_with_message(
            self.view(partition, None),
            reply.describe(),
        ))
    }
}
