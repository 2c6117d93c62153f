//! `POST /api/upload` — the upload relay — and the upload-URL indirection.

use std::path::Path;

use axum::{
  Json,
  extract::{Multipart, State},
};
use glyphcast_core::store::FrameStore;
use serde::Serialize;
use sha2::{Digest as _, Sha256};

use crate::{AppState, error::Error};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
  /// Where the relay stored the bytes; input to `process-video`.
  pub file_path:      String,
  /// The client-side file name, echoed back for metadata saving.
  pub file_name:      String,
  pub video_basename: String,
  pub file_size:      u64,
  /// SHA-256 hex digest of the stored bytes.
  pub content_hash:   String,
}

/// `POST /api/upload` — multipart form, field `file`.
///
/// Stores the bytes under the upload directory as
/// `<millis-timestamp>.<original extension>` so the basename is unique per
/// upload and correlates with the extraction output directories.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<Json<UploadResponse>, Error>
where
  S: FrameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  while let Some(field) = multipart.next_field().await? {
    if field.name() != Some("file") {
      continue;
    }

    let file_name = field
      .file_name()
      .map(str::to_owned)
      .unwrap_or_else(|| "upload.mp4".to_string());
    let data = field.bytes().await?;

    let extension = Path::new(&file_name)
      .extension()
      .map(|e| e.to_string_lossy().into_owned())
      .unwrap_or_else(|| "mp4".to_string());
    let video_basename = chrono::Utc::now().timestamp_millis().to_string();
    let stored_name = format!("{video_basename}.{extension}");

    let upload_dir = &state.dirs.upload_dir;
    tokio::fs::create_dir_all(upload_dir).await?;
    let stored_path = upload_dir.join(&stored_name);
    tokio::fs::write(&stored_path, &data).await?;

    let content_hash = hex::encode(Sha256::digest(&data));
    state.api.metrics.record_upload();
    tracing::info!(
      path = %stored_path.display(),
      size = data.len(),
      "stored upload"
    );

    return Ok(Json(UploadResponse {
      file_path: stored_path.to_string_lossy().into_owned(),
      file_name,
      video_basename,
      file_size: data.len() as u64,
      content_hash,
    }));
  }

  Err(Error::BadRequest("missing \"file\" field".to_string()))
}

#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
  pub url: String,
}

/// `POST /api/upload-url` — upload-URL indirection retained from the
/// original backend surface; the relay accepts uploads directly.
pub async fn upload_url() -> Json<UploadUrlResponse> {
  Json(UploadUrlResponse {
    url: "/api/upload".to_string(),
  })
}
