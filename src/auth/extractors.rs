use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::claims::Claims;
use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts and verifies the bearer JWT, yielding the caller's identity and
/// role flags. Handlers that take this reject unauthenticated requests with
/// 401 before any business logic runs.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Guard for admin-only endpoints.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.0.is_admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin access required".into()))
        }
    }

    /// Guard for endpoints open to admins and team leads.
    pub fn require_staff(&self) -> Result<(), ApiError> {
        if self.0.is_admin || self.0.is_team_lead {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Admin or team lead access required".into(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Invalid auth scheme".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized("Invalid or expired token".into())
        })?;

        Ok(AuthUser(claims))
    }
}
