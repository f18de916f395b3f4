use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::roster_dto::{RosterQuery, RosterView};
use crate::dto::{ApiResponse, DriverForm};
use crate::models::document::DRIVER_DOCUMENT_FIELDS;
use crate::models::{Driver, EntityId};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::multipart::{read_multipart, MAX_UPLOAD_BYTES};

pub fn driver_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/drivers",
            get(list_drivers)
                .post(create_driver)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/drivers/:id", put(update_driver))
        .route("/drivers/:id/block", post(block_driver))
        .route("/drivers/:id/unblock", post(unblock_driver))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<ApiResponse<RosterView<Driver>>>, AppError> {
    let view = DriverController::new(&state).list(query).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn create_driver(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<RosterView<Driver>>>, AppError> {
    let (form, documents) = read_multipart(multipart, DRIVER_DOCUMENT_FIELDS)
        .await?
        .into_form::<DriverForm>()?;
    let response = DriverController::new(&state)
        .create(form.with_documents(documents))
        .await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<DriverForm>,
) -> Result<Json<ApiResponse<RosterView<Driver>>>, AppError> {
    let response = DriverController::new(&state)
        .update(EntityId::from(id), form)
        .await?;
    Ok(Json(response))
}

async fn block_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RosterView<Driver>>>, AppError> {
    let response = DriverController::new(&state)
        .set_blocked(EntityId::from(id), true)
        .await?;
    Ok(Json(response))
}

async fn unblock_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RosterView<Driver>>>, AppError> {
    let response = DriverController::new(&state)
        .set_blocked(EntityId::from(id), false)
        .await?;
    Ok(Json(response))
}
