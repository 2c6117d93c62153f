//! `GET /api/processing-progress/:videoBasename` — the polling endpoint.

use axum::{
  Json,
  extract::{Path, State},
};
use glyphcast_core::store::FrameStore;
use glyphcast_extract::{ExtractionProgress, scan_progress};

use crate::{AppState, error::Error};

/// `GET /api/processing-progress/:videoBasename`
///
/// Pure file counting; a basename that was never processed (or whose output
/// directories do not exist yet) reports zero counts, never an error. The
/// client polls this on a fixed interval — there is no push channel.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(video_basename): Path<String>,
) -> Result<Json<ExtractionProgress>, Error>
where
  S: FrameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let progress = scan_progress(&state.dirs, &video_basename).await?;
  Ok(Json(progress))
}
