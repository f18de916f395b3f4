use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request de login (stub: cualquier credencial no vacía es aceptada)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(custom = "validate_not_blank")]
    pub email: String,
    #[validate(custom = "validate_not_blank")]
    pub password: String,
}

// Operador autenticado
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

impl SessionUser {
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            name,
        }
    }
}

// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: SessionUser,
}
