//! Clients - Acceso al backend de flota
//!
//! Este módulo contiene la interfaz `FleetBackend` y sus dos
//! implementaciones: el cliente HTTP real y el backend en memoria.

pub mod backend;
pub mod fleet_api_client;
pub mod in_memory;

pub use backend::{BackendReply, FleetBackend, SharedBackend};
pub use fleet_api_client::FleetApiClient;
pub use in_memory::{FleetStore, InMemoryBackend};
