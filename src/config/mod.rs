//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del entorno: servidor, backend de
//! flota, sesión y CORS.

pub mod environment;

pub use environment::*;
