use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::auth::AuthUser;
use crate::customers::dto::{CreateCustomerRequest, UpdateCustomerRequest, UpdateStatusRequest};
use crate::customers::repo::{self, CustomerRow};
use crate::customers::status::{plan_transition, CustomerStatus, TransitionPlan};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use crate::util::{PageParams, Paginated};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/customers", get(list_customers))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/status", put(update_status))
        .route(
            "/customers/:id",
            put(update_customer).delete(delete_customer),
        )
}

#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<CustomerRow>>, ApiError> {
    let total = repo::count(&state.db).await?;
    let rows = repo::list(&state.db, params.limit(), params.offset()).await?;
    Ok(Json(Paginated::new(
        rows,
        total,
        params.page(),
        params.limit(),
    )))
}

#[instrument(skip(state, payload))]
pub async fn create_customer(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ApiJson(payload): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let phone = payload
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Phone number is required".into()))?
        .to_string();

    if repo::phone_exists(&state.db, &phone, None).await? {
        warn!(phone_number = %phone, "duplicate phone number");
        return Err(ApiError::Conflict("Phone number already exists".into()));
    }

    let id = repo::insert(&state.db, &payload, &phone, claims.sub).await?;

    info!(customer_id = %id, created_by = %claims.sub, "customer created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Customer created successfully", "id": id })),
    ))
}

/// Pulls the target id and requested status out of the request body.
/// Fails closed before anything touches the database.
fn validate_status_request(payload: &UpdateStatusRequest) -> Result<(i64, CustomerStatus), ApiError> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::InvalidArgument("Missing required fields".into()))?;
    let raw_status = payload
        .status
        .ok_or_else(|| ApiError::InvalidArgument("Missing required fields".into()))?;
    let requested = CustomerStatus::try_from(raw_status)
        .map_err(|v| ApiError::InvalidArgument(format!("Invalid status value: {v}")))?;
    Ok((id, requested))
}

/// Matches the stored status against the transition table. `current` is the
/// raw lookup result; `None` means no row for that customer, so every
/// rejection here happens before the conditional write.
fn decide_transition(
    current: Option<i16>,
    requested: CustomerStatus,
    actor: i32,
    actor_is_admin: bool,
) -> Result<(CustomerStatus, TransitionPlan), ApiError> {
    let current_raw = current.ok_or_else(|| ApiError::NotFound("Customer not found".into()))?;
    let current = CustomerStatus::try_from(current_raw).map_err(|v| {
        warn!(status = %v, "stored status outside the lifecycle");
        ApiError::InvalidTransition
    })?;

    let plan = plan_transition(current, requested, actor, actor_is_admin).ok_or_else(|| {
        warn!(
            from = ?current,
            to = ?requested,
            is_admin = %actor_is_admin,
            "transition rejected"
        );
        ApiError::InvalidTransition
    })?;
    Ok((current, plan))
}

/// The guarded status change. Reads the persisted status, checks the
/// transition table and applies a single conditional write; no rule match
/// means no write at all.
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (id, requested) = validate_status_request(&payload)?;

    let stored = repo::current_status(&state.db, id).await?;
    let (current, plan) = decide_transition(stored, requested, claims.sub, claims.is_admin)?;

    // Zero rows affected means the status moved underneath us between the
    // read and the write; report it the same as any other rule mismatch.
    let affected = repo::update_status(
        &state.db,
        id,
        current.as_i16(),
        plan.new_status.as_i16(),
        plan.updated_by,
    )
    .await?;
    if affected == 0 {
        warn!(customer_id = %id, "status changed concurrently");
        return Err(ApiError::InvalidTransition);
    }

    info!(customer_id = %id, from = ?current, to = ?requested, "status updated");
    Ok(Json(json!({
        "message": "Status updated successfully",
        "status": requested.as_i16(),
    })))
}

#[instrument(skip(state, payload))]
pub async fn update_customer(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let current_phone = repo::phone_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Customer not found".into()))?;

    let phone = payload
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .unwrap_or(current_phone);

    if repo::phone_exists(&state.db, &phone, Some(id)).await? {
        return Err(ApiError::Conflict("Phone number already exists".into()));
    }

    let affected = repo::update_details(
        &state.db,
        id,
        &payload.full_name,
        &payload.year_of_birth,
        &phone,
        &payload.note,
        &payload.role_note,
        payload.team_id,
        claims.sub,
    )
    .await?;
    if affected == 0 {
        return Err(ApiError::NotFound("Customer not found".into()));
    }

    info!(customer_id = %id, updated_by = %claims.sub, "customer updated");
    Ok(Json(json!({ "message": "Customer updated successfully" })))
}

#[instrument(skip(state))]
pub async fn delete_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require_admin()?;

    let affected = repo::delete(&state.db, id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("Customer not found".into()));
    }

    info!(customer_id = %id, deleted_by = %auth.0.sub, "customer deleted");
    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_missing_fields_is_invalid_argument() {
        let no_id = UpdateStatusRequest {
            id: None,
            status: Some(1),
        };
        assert!(matches!(
            validate_status_request(&no_id),
            Err(ApiError::InvalidArgument(_))
        ));

        let no_status = UpdateStatusRequest {
            id: Some(7),
            status: None,
        };
        assert!(matches!(
            validate_status_request(&no_status),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn status_request_out_of_range_value_is_invalid_argument() {
        let req = UpdateStatusRequest {
            id: Some(7),
            status: Some(3),
        };
        assert!(matches!(
            validate_status_request(&req),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn status_request_in_range_passes_through() {
        let req = UpdateStatusRequest {
            id: Some(7),
            status: Some(2),
        };
        let (id, requested) = validate_status_request(&req).unwrap();
        assert_eq!(id, 7);
        assert_eq!(requested, CustomerStatus::Closed);
    }

    #[test]
    fn unknown_customer_is_not_found() {
        let err = decide_transition(None, CustomerStatus::InProgress, 1, false).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn corrupt_stored_status_is_invalid_transition() {
        let err = decide_transition(Some(9), CustomerStatus::Closed, 1, false).unwrap_err();
        assert!(matches!(err, ApiError::InvalidTransition));
    }

    #[test]
    fn forward_move_carries_the_actor() {
        let (current, plan) =
            decide_transition(Some(0), CustomerStatus::InProgress, 42, false).unwrap();
        assert_eq!(current, CustomerStatus::New);
        assert_eq!(plan.new_status, CustomerStatus::InProgress);
        assert_eq!(plan.updated_by, Some(42));
    }

    #[test]
    fn reopen_requires_admin() {
        assert!(matches!(
            decide_transition(Some(2), CustomerStatus::InProgress, 42, false),
            Err(ApiError::InvalidTransition)
        ));

        let (_, plan) = decide_transition(Some(2), CustomerStatus::InProgress, 42, true).unwrap();
        assert_eq!(plan.new_status, CustomerStatus::InProgress);
        assert!(plan.updated_by.is_none());
    }
}
