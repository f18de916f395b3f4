use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::LoginRequest;
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas: login, logout y health
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .route("/health", get(health))
}

/// Destino de las redirecciones sin sesión
async fn login_form() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(
        "Inicia sesión con POST /login {email, password}".to_string(),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.jwt.clone());
    let response = controller.login(request)?;
    let cookie = controller.session_cookie(&response.token);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::success_with_message(
            response,
            "Sesión iniciada".to_string(),
        )),
    ))
}

async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, AuthController::cleared_cookie())]),
        Json(ApiResponse::message("Sesión cerrada".to_string())),
    )
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend": state.backend.backend_tag(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
