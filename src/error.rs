//! Handler error type and the response marker the request logger reads.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::aspect::TimeTrackingError;

/// Response extension set on responses built from a [`HandlerError`].
///
/// The request logger treats such a response as the failure path of the
/// handler: it leaves the processing time out of its line and attaches
/// `message` as the line's `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Tracked(#[from] TimeTrackingError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Tracked(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let mut response = (self.status(), Json(json!({ "error": message }))).into_response();
        response
            .extensions_mut()
            .insert(HandlerFailure { message });
        response
    }
}
