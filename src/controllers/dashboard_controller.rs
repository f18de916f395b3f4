use crate::dto::roster_dto::DashboardSummary;
use crate::services::dashboard_service;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let mut cache = self.state.roster_cache();
        Ok(dashboard_service::load_summary(&mut cache).await?)
    }
}
