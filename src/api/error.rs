use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::aggregates::DraftError;
use crate::WorkbenchError;

impl WorkbenchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WorkbenchError::Validation(_)
            | WorkbenchError::Variation(_)
            | WorkbenchError::Listing(_)
            | WorkbenchError::Shipping(_)
            | WorkbenchError::Social(_)
            | WorkbenchError::Photo(_) => StatusCode::BAD_REQUEST,
            WorkbenchError::Draft(DraftError::NotCreated | DraftError::UnknownVariation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            WorkbenchError::Draft(_) => StatusCode::BAD_REQUEST,
            WorkbenchError::Integration { source, .. } => {
                StatusCode::from_u16(source.status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for WorkbenchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            WorkbenchError::Integration { context, source } => {
                tracing::error!(%context, error = %source, "upstream failure");
                json!({
                    "ok": false,
                    "error": context,
                    "details": { "status": status.as_u16(), "message": source.to_string() },
                })
            }
            other if status.is_server_error() => {
                tracing::error!(error = %other, "internal error");
                json!({ "ok": false, "error": "Internal Server Error" })
            }
            other => json!({ "ok": false, "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
