use serde::Deserialize;

/// Request body for creating a customer. Only the phone number is
/// mandatory; descriptive fields may arrive later via the update path.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub full_name: Option<String>,
    pub year_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub note: Option<String>,
    pub role_note: Option<String>,
    pub team_id: Option<i32>,
}

/// Request body for the guarded status change. Fields are optional so that
/// absence is reported as a 400 with a message rather than a decode error.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub id: Option<i64>,
    pub status: Option<i16>,
}

/// Full-field update of a customer's descriptive attributes. Status is
/// deliberately absent; that only moves through the guarded endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub full_name: Option<String>,
    pub year_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub note: Option<String>,
    pub role_note: Option<String>,
    pub team_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_tolerates_missing_fields() {
        let req: UpdateStatusRequest = serde_json::from_str("{}").unwrap();
        assert!(req.id.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn status_request_rejects_non_numeric_status() {
        let res = serde_json::from_str::<UpdateStatusRequest>(r#"{"id": 1, "status": "closed"}"#);
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn mistyped_status_body_yields_invalid_argument() {
        use axum::extract::FromRequest;
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        use crate::error::{ApiError, ApiJson};

        let req = axum::http::Request::builder()
            .method("PUT")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"id": 1, "status": "2"}"#))
            .unwrap();

        let err = ApiJson::<UpdateStatusRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
