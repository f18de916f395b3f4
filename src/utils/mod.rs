//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y lectura de formularios multipart.

pub mod errors;
pub mod jwt;
pub mod multipart;
pub mod validation;

pub use errors::{AppError, AppResult, FleetError, FleetResult};
