//! Relay error type and axum `IntoResponse` implementation.
//!
//! The taxonomy is deliberately coarse: "not found" conditions are soft
//! skips for the client, everything else collapses to a logged 500 with a
//! generic message.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("multipart error: {0}")]
  Multipart(#[from] axum::extract::multipart::MultipartError),

  /// `getFile` was called before any `process-video`.
  #[error("no video has been processed yet")]
  NoActiveVideo,

  #[error(transparent)]
  Extract(#[from] glyphcast_extract::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    use glyphcast_extract::Error as Extract;

    let (status, message) = match &self {
      Error::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      Error::Multipart(e) => (StatusCode::BAD_REQUEST, e.to_string()),
      Error::NoActiveVideo => (StatusCode::CONFLICT, self.to_string()),
      Error::Extract(Extract::FrameNotFound(name)) => {
        (StatusCode::NOT_FOUND, format!("{name} not found"))
      }
      Error::Extract(Extract::VideoNotFound(path)) => {
        (StatusCode::NOT_FOUND, format!("{} not found", path.display()))
      }
      Error::Extract(Extract::Io(e)) => {
        tracing::error!(error = %e, "extraction io error");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
      Error::Io(e) => {
        tracing::error!(error = %e, "relay io error");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    };

    (status, Json(json!({ "error": message }))).into_response()
  }
}
