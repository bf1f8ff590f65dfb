//! Extractors whose rejections go through [`WorkbenchError`], so a body that
//! fails to parse gets the same `{ ok: false, error }` reply as any other
//! validation failure.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::WorkbenchError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WorkbenchError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for WorkbenchError {
    fn from(rejection: JsonRejection) -> Self {
        WorkbenchError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Numeric product id from a path segment.
pub fn product_id(raw: &str) -> Result<u64, WorkbenchError> {
    raw.parse().map_err(|_| WorkbenchError::Validation("Invalid product ID".into()))
}
