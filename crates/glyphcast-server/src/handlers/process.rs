//! `POST /api/process-video` — fire-and-forget extraction spawn.

use std::path::Path;

use axum::{Json, extract::State};
use glyphcast_core::store::FrameStore;
use glyphcast_extract::{basename_of, spawn_extraction};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessBody {
  pub file_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
  pub success:        bool,
  pub message:        String,
  pub video_basename: String,
}

/// `POST /api/process-video` — body `{"filePath": ...}`.
///
/// Spawns the extraction script detached and responds immediately; the
/// script's progress is observed through `processing-progress`, and its
/// eventual success or failure never reaches this handler. 404 when the
/// video file does not exist.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ProcessBody>,
) -> Result<Json<ProcessResponse>, Error>
where
  S: FrameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let video_path = Path::new(&body.file_path);
  let video_basename = basename_of(video_path);

  spawn_extraction(&state.config.script_path, video_path, &state.dirs).await?;

  // The most recent spawn wins; getFile resolves frames against it.
  *state.active_basename.write().await = Some(video_basename.clone());
  state.api.metrics.record_extraction_spawned();

  Ok(Json(ProcessResponse {
    success: true,
    message: "extraction started".to_string(),
    video_basename,
  }))
}
