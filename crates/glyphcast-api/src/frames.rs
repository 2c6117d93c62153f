//! Handlers for `/frames` endpoints — the ASCII grid.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/frames` | All rows, line number ascending |
//! | `POST` | `/frames/reset` | Body: `{"lineCount":N}`; destructive re-init |
//! | `POST` | `/frames/lines` | Body: [`LineBatchBody`]; returns rows updated |
//! | `GET`  | `/frames/:line_number` | Single row, 404 if not found |
//!
//! Resets take the [`ResetBarrier`](crate::ResetBarrier) exclusively and
//! batched patches take it shared, so a reset can never delete rows out from
//! under an in-flight patch.

use axum::{
  Json,
  extract::{Path, State},
};
use glyphcast_core::{
  frame::{FrameLine, LineUpdate},
  store::FrameStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /frames`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<FrameLine>>, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lines = state
    .store
    .all_lines()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  state.metrics.record_frame_query();
  Ok(Json(lines))
}

// ─── Reset ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetBody {
  pub line_count: u32,
}

/// `POST /frames/reset` — wipe the grid and insert `lineCount` placeholders.
pub async fn reset<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ResetBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let _token = state.barrier.exclusive().await;

  state
    .store
    .reset_frame_table(body.line_count)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(line_count = body.line_count, "frame grid reset");
  Ok(Json(serde_json::json!({ "lineCount": body.line_count })))
}

// ─── Batched patch ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBatchBody {
  pub frame_number: i64,
  pub updates:      Vec<LineUpdate>,
}

#[derive(Debug, Serialize)]
pub struct LineBatchResponse {
  pub updated: usize,
}

/// `POST /frames/lines` — patch rows by line number with one frame's
/// content. Updates for lines the grid does not have are silently skipped.
pub async fn update_lines<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<LineBatchBody>,
) -> Result<Json<LineBatchResponse>, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let _token = state.barrier.shared().await;

  let updated = state
    .store
    .apply_line_updates(body.frame_number, &body.updates)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  state.metrics.record_line_rows_written(updated as u64);
  Ok(Json(LineBatchResponse { updated }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /frames/:line_number`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(line_number): Path<u32>,
) -> Result<Json<FrameLine>, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let line = state
    .store
    .line(line_number)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("line {line_number} not found")))?;
  Ok(Json(line))
}
