use crate::cache::RosterCache;
use crate::dto::roster_dto::{RosterQuery, RosterView};
use crate::dto::{ApiResponse, DriverForm};
use crate::models::driver::DRIVER_SEARCH_FIELDS;
use crate::models::{Driver, EntityId, EntityKind, Partition};
use crate::services::{PairingCoordinator, PairingLocks, RecordService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;

use super::roster_view;

pub struct DriverController {
    cache: RosterCache,
    locks: Arc<PairingLocks>,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cache: state.roster_cache(),
            locks: Arc::clone(&state.pairing_locks),
        }
    }

    fn view(&self, partition: Partition, query: Option<String>) -> RosterView<Driver> {
        roster_view(
            &self.cache,
            self.cache.drivers(partition),
            partition,
            query,
            DRIVER_SEARCH_FIELDS,
        )
    }

    pub async fn list(&mut self, query: RosterQuery) -> Result<RosterView<Driver>, AppError> {
        let partition = query.partition.unwrap_or_default();
        self.cache.load(EntityKind::Driver, partition).await?;
        Ok(self.view(partition, query.q))
    }

    pub async fn create(
        &mut self,
        form: DriverForm,
    ) -> Result<ApiResponse<RosterView<Driver>>, AppError> {
        let reply = RecordService::new(&mut self.cache)
            .create_driver(&form)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.view(Partition::Active, None),
            reply
                .message
                .unwrap_or_else(|| "Conductor creado exitosamente".to_string()),
        ))
    }

    pub async fn update(
        &mut self,
        id: EntityId,
        form: DriverForm,
    ) -> Result<ApiResponse<RosterView<Driver>>, AppError> {
        let reply = RecordService::new(&mut self.cache)
            .update_driver(&id, &form)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.view(Partition::Active, None),
            reply
                .message
                .unwrap_or_else(|| "Conductor actualizado exitosamente".to_string()),
        ))
    }

    /// Bloquear o desbloquear; devuelve la partición a la que pasó el
    /// conductor
    pub async fn set_blocked(
        &mut self,
        id: EntityId,
        blocked: bool,
    ) -> Result<ApiResponse<RosterView<Driver>>, AppError> {
        let reply = PairingCoordinator::new(&mut self.cache, Arc::clone(&self.locks))
            .set_blocked(EntityKind::Driver, &id, blocked)
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
