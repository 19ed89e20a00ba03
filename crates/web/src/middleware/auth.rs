use std::collections::HashSet;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use storage::models::{Actor, Role};
use uuid::Uuid;

use crate::error::WebError;

/// Shared secrets for the identity gateway. The gateway authenticates end
/// users itself and forwards the verified identity in headers; this service
/// only checks that the caller really is the gateway.
#[derive(Clone)]
pub struct GatewayKeys {
    keys: HashSet<String>,
}

impl GatewayKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Check the gateway bearer key and turn the forwarded identity headers
/// into an `Actor` request extension.
pub async fn require_identity(
    State(keys): State<GatewayKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(WebError::Unauthorized)?;

    if !keys.is_valid(token) {
        tracing::warn!("Invalid gateway key attempt");
        return Err(WebError::Unauthorized);
    }

    let id = request
        .headers()
        .get("x-identity-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or(WebError::Unauthorized)?;

    let role = match request
        .headers()
        .get("x-identity-role")
        .and_then(|value| value.to_str().ok())
    {
        Some("ADMIN") => Role::Admin,
        Some("USER") => Role::User,
        _ => return Err(WebError::Unauthorized),
    };

    request.extensions_mut().insert(Actor { id, role });
    Ok(next.run(request).await)
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, WebError> {
    match request.extensions().get::<Actor>() {
        Some(actor) if actor.is_admin() => Ok(next.run(request).await),
        Some(actor) => {
            tracing::warn!("Identity {} attempted an admin route", actor.id);
            Err(WebError::Forbidden("Admin role required".to_string()))
        }
        None => Err(WebError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_keys() {
        let keys = GatewayKeys::from_comma_separated("alpha, beta ,,gamma");
        assert!(keys.is_valid("alpha"));
        assert!(keys.is_valid("beta"));
        assert!(keys.is_valid("gamma"));
        assert!(!keys.is_valid(""));
        assert!(!keys.is_valid("delta"));
    }
}
