//! Success envelope shared by every route

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response body with the payload's fields flattened next to `"success": true`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
