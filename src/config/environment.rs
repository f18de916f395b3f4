//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! `Default` da valores de desarrollo; `from_env` los sobrescribe con las
//! variables presentes.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Origen de los datos de flota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Backend REST real
    Http,
    /// Backend en memoria con datos de ejemplo
    Memory,
}

impl FromStr for BackendMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "http" => Ok(BackendMode::Http),
            "memory" => Ok(BackendMode::Memory),
            other => bail!("FLEET_BACKEND_MODE must be 'http' or 'memory', got '{}'", other),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub fleet_api_base_url: String,
    pub backend_mode: BackendMode,
    pub http_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            fleet_api_base_url: "http://localhost:8080/api".to_string(),
            backend_mode: BackendMode::Http,
            http_timeout_secs: 15,
            request_timeout_secs: 30,
            max_concurrent_requests: 256,
            jwt_secret: "dev-only-fleet-console-secret".to_string(),
            jwt_expiration: 8 * 3600, // 8 horas
            cors_origins: vec!["http://localhost:5173".to_string()],
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be valid: {}", name, e)),
        Err(_) => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => defaults.jwt_secret,
        };

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.cors_origins,
        };

        let backend_mode = match env::var("FLEET_BACKEND_MODE") {
            Ok(raw) => raw.parse().context("Invalid FLEET_BACKEND_MODE")?,
            Err(_) => defaults.backend_mode,
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            fleet_api_base_url: env::var("FLEET_API_BASE_URL")
                .unwrap_or(defaults.fleet_api_base_url),
            backend_mode,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            max_concurrent_requests: parse_var(
                "MAX_CONCURRENT_REQUESTS",
                defaults.max_concurrent_requests,
            )?,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
