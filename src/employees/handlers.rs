use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::auth::password::hash_password;
use crate::auth::AuthUser;
use crate::employees::dto::{parse_role, CreateEmployeeRequest, ResetPasswordRequest};
use crate::employees::repo::{self, EmployeeRow};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use crate::util::{PageParams, Paginated};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/reset-password", put(reset_password))
}

fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[a-zA-Z0-9_.-]{3,32}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<EmployeeRow>>, ApiError> {
    auth.require_staff()?;

    let total = repo::count(&state.db).await?;
    let rows = repo::list(&state.db, params.limit(), params.offset()).await?;
    Ok(Json(Paginated::new(
        rows,
        total,
        params.page(),
        params.limit(),
    )))
}

/// Provision an employee account. The initial password is the username; the
/// account is created with `is_first_login` set, so the first login forces a
/// change.
#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    auth.require_staff()?;

    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Username, name, and team_id are required".into()))?;
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Username, name, and team_id are required".into()))?;
    let team_id = payload
        .team_id
        .ok_or_else(|| ApiError::InvalidArgument("Username, name, and team_id are required".into()))?;

    if !is_valid_username(username) {
        warn!(%username, "invalid username");
        return Err(ApiError::InvalidArgument("Invalid username".into()));
    }

    if repo::username_exists(&state.db, username).await? {
        warn!(%username, "duplicate username");
        return Err(ApiError::Conflict("Username already exists".into()));
    }

    let flags = parse_role(payload.user_role.as_deref());
    let status = payload.status.unwrap_or(1);
    let hash = hash_password(username)?;

    let id = repo::insert(
        &state.db,
        username,
        name,
        &hash,
        flags.is_admin,
        flags.is_team_lead,
        status,
        team_id,
        auth.0.sub,
    )
    .await?;

    info!(user_id = %id, %username, created_by = %auth.0.sub, "employee created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "data": { "id": id, "username": username, "name": name, "team_id": team_id },
        })),
    ))
}

/// Puts the account back into the forced-reset state; the password itself is
/// unchanged until the employee logs in and picks a new one.
#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require_staff()?;

    let id = payload
        .id
        .ok_or_else(|| ApiError::InvalidArgument("User ID is required".into()))?;

    let affected = repo::flag_first_login(&state.db, id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = %id, by = %auth.0.sub, "password reset flagged");
    Ok(Json(json!({ "message": "Reset password successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_validation_accepts_typical_logins() {
        for ok in ["agent07", "team.lead", "a_b-c", "abc"] {
            assert!(is_valid_username(ok), "{ok}");
        }
    }

    #[test]
    fn username_validation_rejects_bad_shapes() {
        let too_long = "x".repeat(33);
        for bad in ["ab", "has space", "semi;colon", "", too_long.as_str()] {
            assert!(!is_valid_username(bad), "{bad:?}");
        }
    }
}
