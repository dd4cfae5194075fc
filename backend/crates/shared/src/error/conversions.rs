//! Error conversions
//!
//! [`IdParseError`] into [`AppError`], and the JSON rendering of
//! [`AppError`] when the `axum` feature is on.

use super::app_error::AppError;
use crate::id::IdParseError;

impl From<IdParseError> for AppError {
    fn from(err: IdParseError) -> Self {
        AppError::bad_request("Invalid ID").with_source(err)
    }
}

/// Renders `{"error": message}`, plus `"action"` when a hint is set
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::Map::new();
        body.insert("error".into(), self.message().into());
        if let Some(action) = self.action() {
            body.insert("action".into(), action.into());
        }

        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_id_parse_error_conversion() {
        let err: AppError = IdParseError::NotANumber.into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "Invalid ID");
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_body() {
        use axum::response::IntoResponse;

        let resp = AppError::unauthorized("Account is locked. Please try again later.")
            .with_action("Wait 15 minutes before trying again")
            .into_response();
        assert_eq!(resp.status().as_u16(), 401);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Account is locked. Please try again later.");
        assert_eq!(body["action"], "Wait 15 minutes before trying again");
    }
}
