use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::pairing_controller::PairingController;
use crate::dto::pairing_dto::{
    EmployeePairingCandidates, PairDriverVehicleRequest, PairEmployeeDriverRequest,
    VehiclePairingCandidates,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn pairing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pairingvehicle",
            get(vehicle_candidates).post(pair_driver_vehicle),
        )
        .route(
            "/pairingemployees",
            get(employee_candidates).post(pair_employee_driver),
        )
}

async fn vehicle_candidates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<VehiclePairingCandidates>>, AppError> {
    let candidates = PairingController::new(&state)
        .load_vehicle_candidates()
        .await?;
    Ok(Json(ApiResponse::success(candidates)))
}

async fn pair_driver_vehicle(
    State(state): State<AppState>,
    Json(request): Json<PairDriverVehicleRequest>,
) -> Result<Json<ApiResponse<VehiclePairingCandidates>>, AppError> {
    let response = PairingController::new(&state)
        .pair_driver_vehicle(request)
        .await?;
    Ok(Json(response))
}

async fn employee_candidates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EmployeePairingCandidates>>, AppError> {
    let candidates = PairingController::new(&state)
        .load_employee_candidates()
        .await?;
    Ok(Json(ApiResponse::success(candidates)))
}

async fn pair_employee_driver(
    State(state): State<AppState>,
    Json(request): Json<PairEmployeeDriverRequest>,
) -> Result<Json<ApiResponse<EmployeePairingCandidates>>, AppError> {
    let response = PairingController::new(&state)
        .pair_employee_driver(request)
        .await?;
    Ok(Json(response))
}
