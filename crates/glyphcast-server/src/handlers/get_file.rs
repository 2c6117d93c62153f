//! `POST /api/getFile` — one frame's ASCII text.

use axum::{Json, extract::State};
use glyphcast_core::store::FrameStore;
use glyphcast_extract::{FrameText, read_frame_text};
use serde::Deserialize;

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFileBody {
  pub frame_number:   u32,
  /// Defaults to the basename of the most recent `process-video` call.
  #[serde(default)]
  pub video_basename: Option<String>,
}

/// `POST /api/getFile` — body `{"frameNumber": N}`.
///
/// 404 when `out{NNNN}.jpg.txt` is absent; the frame-line table is never
/// touched here — pushing the lines into the store is the client's second
/// step. 409 when no video has been processed and no basename was given.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<GetFileBody>,
) -> Result<Json<FrameText>, Error>
where
  S: FrameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let video_basename = match body.video_basename {
    Some(basename) => basename,
    None => state
      .active_basename
      .read()
      .await
      .clone()
      .ok_or(Error::NoActiveVideo)?,
  };

  let frame = read_frame_text(&state.dirs, &video_basename, body.frame_number).await?;
  state.api.metrics.record_frame_file_served();
  Ok(Json(frame))
}
