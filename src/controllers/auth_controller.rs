use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, SessionUser};
use crate::middleware::auth::SESSION_COOKIE;
use crate::utils::errors::{AppError, FleetError};
use crate::utils::jwt::{generate_token, JwtConfig};

/// Login stub de la consola: acepta cualquier credencial no vacía
pub struct AuthController {
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt }
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate().map_err(FleetError::from)?;

        let email = request.email.trim();
        let token = generate_token(email, &self.jwt)?;
        info!("🔑 Sesión iniciada para {}", email);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expiration,
            user: SessionUser::from_email(email),
        })
    }

    /// Valor del header `Set-Cookie` con la sesión
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, token, self.jwt.expiration
        )
    }

    /// Cookie que borra la sesión
    pub fn cleared_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }
}
