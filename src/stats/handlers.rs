use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::stats::repo;

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats/calls", get(call_counts))
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub role_note: Option<String>,
}

impl StatsParams {
    /// The UI sends the literal string "null" when no caller is selected.
    fn normalized_role_note(&self) -> Option<&str> {
        self.role_note
            .as_deref()
            .filter(|v| !v.is_empty() && *v != "null")
    }
}

#[instrument(skip(state))]
pub async fn call_counts(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(params): Query<StatsParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let rows = repo::call_counts(&state.db, params.normalized_role_note()).await?;
    Ok(Json(json!({ "data": rows })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_null_and_empty_mean_no_filter() {
        for raw in [None, Some("null".to_string()), Some(String::new())] {
            let params = StatsParams { role_note: raw };
            assert_eq!(params.normalized_role_note(), None);
        }
    }

    #[test]
    fn real_values_pass_through() {
        let params = StatsParams {
            role_note: Some("agent07".into()),
        };
        assert_eq!(params.normalized_role_note(), Some("agent07"));
    }
}
