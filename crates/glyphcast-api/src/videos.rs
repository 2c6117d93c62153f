//! Handlers for `/videos` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/videos` | All records, newest upload first |
//! | `POST` | `/videos` | Body: [`NewVideo`]; returns 201 + stored record |
//! | `GET`  | `/videos/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use glyphcast_core::{
  store::FrameStore,
  video::{NewVideo, VideoRecord},
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /videos`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<VideoRecord>>, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let videos = state
    .store
    .list_videos()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(videos))
}

/// `POST /videos` — returns 201 + the stored [`VideoRecord`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewVideo>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .save_video(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /videos/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<VideoRecord>, ApiError>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let video = state
    .store
    .get_video(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("video {id} not found")))?;
  Ok(Json(video))
}
