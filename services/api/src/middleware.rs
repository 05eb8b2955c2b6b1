//! Bearer-token authentication and role gating

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, models::Role, state::AppState};

/// Identity resolved from a validated token, attached to the request
/// extensions for downstream handlers
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

/// Validate the bearer token and attach the resolved identity
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::Auth("No token, authorization denied".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Auth("No token, authorization denied".to_string()))?;

    let claims = state.jwt_service.validate(token).map_err(|e| {
        warn!("Token validation failed: {}", e);
        ApiError::Auth("Token is not valid".to_string())
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Reject requests whose resolved identity lacks the admin role
///
/// Must run after `auth_middleware`; a request that reaches this without a
/// resolved identity is treated as unauthenticated.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::Auth("No token, authorization denied".to_string()))?;

    if user.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}
