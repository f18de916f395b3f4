//! Middleware de sesión
//!
//! Las vistas protegidas necesitan un token de sesión válido, ya sea en el
//! header `Authorization: Bearer` o en la cookie `fleet_session`. Sin
//! sesión la request se redirige a `/login`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::state::AppState;
use crate::utils::jwt::{extract_bearer, extract_cookie, verify_token, SessionClaims};

/// Nombre de la cookie de sesión
pub const SESSION_COOKIE: &str = "fleet_session";

/// Ruta a la que se redirige sin sesión
pub const LOGIN_PATH: &str = "/login";

/// Token de sesión de la request, si lo hay
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer);

    bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|cookies| extract_cookie(cookies, SESSION_COOKIE))
    })
}

/// Middleware de sesión: inyecta `SessionClaims` en las extensions
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = session_token(request.headers())
        .and_then(|token| verify_token(token, &state.jwt).ok());

    match claims {
        Some(claims) => {
            request.extensions_mut().insert::<SessionClaims>(claims);
            next.run(request).await
        }
        None => {
            debug!("🔒 Sin sesión para {}, redirigiendo a login", request.uri());
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; fleet_session=xyz"),
        );
        assert_eq!(session_token(&headers), Some("abc"));

        headers.remove(header::AUTHORIZATION);
        assert_eq!(session_token(&headers), Some("xyz"));
    }

    #[test]
    fn test_no_token() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
