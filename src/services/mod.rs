//! Services module
//!
//! Este módulo contiene la lógica del gestor de rosters y emparejamientos:
//! filtros puros (disponibilidad y búsqueda) y los servicios que escriben
//! contra el backend y recargan la cache de la vista.

pub mod availability;
pub mod dashboard_service;
pub mod pairing_coordinator;
pub mod pairing_locks;
pub mod record_service;
pub mod search;

pub use availability::{available, available_owned};
pub use pairing_coordinator::PairingCoordinator;
pub use pairing_locks::PairingLocks;
pub use record_service::RecordService;
pub use search::search;
