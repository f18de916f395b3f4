use crate::cache::RosterCache;
use crate::dto::roster_dto::{RosterQuery, RosterView};
use crate::dto::{ApiResponse, EmployeeForm};
use crate::models::employee::EMPLOYEE_SEARCH_FIELDS;
use crate::models::{Employee, EntityId, EntityKind, Partition};
use crate::services::{PairingCoordinator, PairingLocks, RecordService};
use crate::state::AppState;
use crate::utils::errors::{AppError, FleetError};
use std::sync::Arc;

use super::roster_view;

pub struct EmployeeController {
    cache: RosterCache,
    locks: Arc<PairingLocks>,
}

impl EmployeeController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cache: state.roster_cache(),
            locks: Arc::clone(&state.pairing_locks),
        }
    }

    fn view(&self, query: Option<String>) -> RosterView<Employee> {
        roster_view(
            &self.cache,
            self.cache.employees(),
            Partition::Active,
            query,
            EMPLOYEE_SEARCH_FIELDS,
        )
    }

    pub async fn list(&mut self, query: RosterQuery) -> Result<RosterView<Employee>, AppError> {
        if query.partition == Some(Partition::Blocked) {
            return Err(
                FleetError::Unsupported("employees have no blocked partition".to_string()).into(),
            );
        }
        self.cache
            .load(EntityKind::Employee, Partition::Active)
            .await?;
        Ok(self.view(query.q))
    }

    pub async fn create(
        &mut self,
        form: EmployeeForm,
    ) -> Result<ApiResponse<RosterView<Employee>>, AppError> {
        let reply = RecordService::new(&mut self.cache)
            .create_employee(&form)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.view(None),
            reply
                .message
                .unwrap_or_else(|| "Empleado creado exitosamente".to_string()),
        ))
    }

    pub async fn delete(
        &mut self,
        id: EntityId,
    ) -> Result<ApiResponse<RosterView<Employee>>, AppError> {
        let reply = PairingCoordinator::new(&mut self.cache, Arc::clone(&self.locks))
            .delete_employee(&id)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.view(None),
            reply
                .message
                .unwrap_or_else(|| "Empleado eliminado exitosamente".to_string()),
        ))
    }
}
