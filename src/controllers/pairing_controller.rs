use crate::cache::RosterCache;
use crate::dto::pairing_dto::{
    EmployeePairingCandidates, PairDriverVehicleRequest, PairEmployeeDriverRequest,
    VehiclePairingCandidates,
};
use crate::dto::ApiResponse;
use crate::models::{PairingKind, PairingReceipt, Partition};
use crate::services::{available_owned, PairingCoordinator, PairingLocks};
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;

/// Vistas `/pairingvehicle` y `/pairingemployees`
pub struct PairingController {
    cache: RosterCache,
    locks: Arc<PairingLocks>,
}

impl PairingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cache: state.roster_cache(),
            locks: Arc::clone(&state.pairing_locks),
        }
    }

    fn vehicle_candidates(&self) -> VehiclePairingCandidates {
        VehiclePairingCandidates {
            drivers: available_owned(self.cache.drivers(Partition::Active), true),
            vehicles: available_owned(self.cache.vehicles(Partition::Active), true),
        }
    }

    fn employee_candidates(&self) -> EmployeePairingCandidates {
        EmployeePairingCandidates {
            employees: available_owned(self.cache.employees(), true),
            drivers: available_owned(self.cache.drivers(Partition::Active), true),
        }
    }

    fn confirmation(receipt: PairingReceipt, default: &str) -> String {
        receipt.message.unwrap_or_else(|| default.to_string())
    }

    /// Conductores y vehículos disponibles, cargados en paralelo
    pub async fn load_vehicle_candidates(&mut self) -> Result<VehiclePairingCandidates, AppError> {
        self.cache
            .load_pairing_candidates(PairingKind::DriverVehicle)
            .await?;
        Ok(self.vehicle_candidates())
    }

    pub async fn load_employee_candidates(
        &mut self,
    ) -> Result<EmployeePairingCandidates, AppError> {
        self.cache
            .load_pairing_candidates(PairingKind::EmployeeDriver)
            .await?;
        Ok(self.employee_candidates())
    }

    pub async fn pair_driver_vehicle(
        &mut self,
        request: PairDriverVehicleRequest,
    ) -> Result<ApiResponse<VehiclePairingCandidates>, AppError> {
        let receipt = PairingCoordinator::new(&mut self.cache, Arc::clone(&self.locks))
            .pair_driver_vehicle(&request.driver_id, &request.vehicle_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.vehicle_candidates(),
            Self::confirmation(receipt, "Conductor emparejado con el vehículo"),
        ))
    }

    pub async fn pair_employee_driver(
        &mut self,
        request: PairEmployeeDriverRequest,
    ) -> Result<ApiResponse<EmployeePairingCandidates>, AppError> {
        let receipt = PairingCoordinator::new(&mut self.cache, Arc::clone(&self.locks))
            .pair_employee_driver(&request.employee_id, &request.driver_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            self.employee_candidates(),
            Self::confirmation(receipt, "Conductor asignado al empleado"),
        ))
    }
}
