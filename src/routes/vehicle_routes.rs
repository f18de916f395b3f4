use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::roster_dto::{RosterQuery, RosterView};
use crate::dto::{ApiResponse, VehicleForm};
use crate::models::document::VEHICLE_DOCUMENT_FIELDS;
use crate::models::{EntityId, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::multipart::{read_multipart, MAX_UPLOAD_BYTES};

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles",
            get(list_vehicles)
                .post(create_vehicle)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/vehicles/:id", put(update_vehicle))
        .route("/vehicles/:id/block", post(block_vehicle))
        .route("/vehicles/:id/unblock", post(unblock_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<ApiResponse<RosterView<Vehicle>>>, AppError> {
    let view = VehicleController::new(&state).list(query).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn create_vehicle(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<RosterView<Vehicle>>>, AppError> {
    let (form, documents) = read_multipart(multipart, VEHICLE_DOCUMENT_FIELDS)
        .await?
        .into_form::<VehicleForm>()?;
    let response = VehicleController::new(&state)
        .create(form.with_documents(documents))
        .await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<VehicleForm>,
) -> Result<Json<ApiResponse<RosterView<Vehicle>>>, AppError> {
    let response = VehicleController::new(&state)
        .update(EntityId::from(id), form)
        .await?;
    Ok(Json(response))
}

async fn block_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RosterView<Vehicle>>>, AppError> {
    let response = VehicleController::new(&state)
        .set_blocked(EntityId::from(id), true)
        .await?;
    Ok(Json(response))
}

async fn unblock_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RosterView<Vehicle>>>, AppError> {
    let response = VehicleController::new(&state)
        .set_blocked(EntityId::from(id), false)
        .await?;
    Ok(Json(response))
}
