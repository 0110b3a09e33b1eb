//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is a JSON body with a `kind` and a human-readable
//! `message`; a missing page also lists the pages that are available.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use postlens_query::{ErrorKind, QueryError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Query(#[from] QueryError),

  /// The request could not be parsed into the handler's arguments.
  #[error("{0}")]
  BadRequest(String),

  #[error("background task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

impl From<postlens_core::Error> for ApiError {
  fn from(e: postlens_core::Error) -> Self { Self::Query(QueryError::Store(e)) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl ApiError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Query(e) => e.kind(),
      Self::BadRequest(_) => ErrorKind::Validation,
      Self::Join(_) => ErrorKind::Internal,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let kind = self.kind();
    let status = match kind {
      ErrorKind::NoDataYet | ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Validation => StatusCode::BAD_REQUEST,
      ErrorKind::CorruptedData | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, ?kind, "request failed");
    }

    let mut body = json!({ "kind": kind, "message": self.to_string() });
    if let Self::Query(QueryError::PageNotFound { available, .. }) = &self {
      body["available_pages"] = json!(available);
    }
    (status, Json(body)).into_response()
  }
}
