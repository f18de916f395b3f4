//! Fleet Console
//!
//! Consola de operaciones de flota: rosters de conductores, vehículos y
//! empleados, emparejamientos conductor↔vehículo y empleado↔conductor, y
//! bloqueos, sobre un backend REST que es la fuente de verdad.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use cache::{Roster, RosterCache};
pub use clients::{FleetApiClient, FleetBackend, InMemoryBackend, SharedBackend};
pub use routes::build_app;
pub use state::AppState;
pub use utils::errors::{FleetError, FleetResult};
