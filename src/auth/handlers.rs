use axum::{
    extract::{FromRef, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{AuthResponse, LoginRequest, PublicUser, UpdatePasswordRequest},
    extractors::AuthUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::{self, User},
};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/password", put(update_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn public_view(user: &User) -> PublicUser {
    PublicUser {
        id: user.id,
        username: user.username.clone(),
        name: user.name.clone(),
        is_admin: user.is_admin,
        is_team_lead: user.is_team_lead,
        team_id: user.team_id,
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Username and password are required".into(),
        ));
    }

    // Unknown user and wrong password report the same message.
    let user = repo::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| {
            warn!(%username, "login unknown username");
            ApiError::Unauthorized("Invalid username or password".into())
        })?;

    if !verify_password(&payload.password, &user.password)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized(
            "Invalid username or password".into(),
        ));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse {
        token,
        is_first_login: user.is_first_login,
        user: public_view(&user),
    }))
}

/// Self-service password change, also the target of the forced reset after
/// first login. Only the authenticated user's own password can be changed.
#[instrument(skip(state, payload))]
pub async fn update_password(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ApiJson(payload): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if payload.password.len() < 8 {
        warn!(user_id = %claims.sub, "password too short");
        return Err(ApiError::InvalidArgument("Password too short".into()));
    }

    let user = repo::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let hash = hash_password(&payload.password)?;
    repo::set_password(&state.db, user.id, &hash).await?;

    // Token is reissued so the client sees is_first_login cleared.
    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = %user.id, "password updated");
    Ok(Json(AuthResponse {
        token,
        is_first_login: false,
        user: public_view(&user),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = repo::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    Ok(Json(public_view(&user)))
}
