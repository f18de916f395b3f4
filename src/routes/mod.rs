//! Rutas de la consola
//!
//! Las vistas protegidas pasan por el middleware de sesión; las rutas
//! desconocidas redirigen a `/login`.

pub mod auth_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod employee_routes;
pub mod pairing_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn_with_state, response::Redirect, Router};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::auth::{require_session, LOGIN_PATH};
use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Vistas que requieren sesión
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(dashboard_routes::dashboard_routes())
        .merge(driver_routes::driver_routes())
        .merge(vehicle_routes::vehicle_routes())
        .merge(employee_routes::employee_routes())
        .merge(pairing_routes::pairing_routes())
        .route_layer(from_fn_with_state(state.clone(), require_session))
}

/// Router completo de la consola con todas sus capas
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .merge(auth_routes::auth_routes())
        .merge(protected_routes(&state))
        .fallback(|| async { Redirect::to(LOGIN_PATH) })
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(CompressionLayer::new())
        .layer(cors_for(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
