//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No contiene rosters: cada vista crea su
//! propia `RosterCache`.

use std::sync::Arc;

use crate::cache::RosterCache;
use crate::clients::SharedBackend;
use crate::config::environment::EnvironmentConfig;
use crate::services::PairingLocks;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub backend: SharedBackend,
    pub pairing_locks: Arc<PairingLocks>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, backend: SharedBackend) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            config,
            backend,
            pairing_locks: PairingLocks::new(),
            jwt,
        }
    }

    /// Cache nueva para una vista (una por request)
    pub fn roster_cache(&self) -> RosterCache {
        RosterCache::new(Arc::clone(&self.backend))
    }
}
