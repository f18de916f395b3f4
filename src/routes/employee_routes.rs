use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};

use crate::controllers::employee_controller::EmployeeController;
use crate::dto::roster_dto::{RosterQuery, RosterView};
use crate::dto::{ApiResponse, EmployeeForm};
use crate::models::{Employee, EntityId};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", delete(delete_employee))
}

async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<ApiResponse<RosterView<Employee>>>, AppError> {
    let view = EmployeeController::new(&state).list(query).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(form): Json<EmployeeForm>,
) -> Result<Json<ApiResponse<RosterView<Employee>>>, AppError> {
    let response = EmployeeController::new(&state).create(form).await?;
    Ok(Json(response))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RosterView<Employee>>>, AppError> {
    let response = EmployeeController::new(&state)
        .delete(EntityId::from(id))
        .await?;
    Ok(Json(response))
}
