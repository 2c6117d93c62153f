//! Handler for `GET /stats` — the throughput counters.

use axum::{Json, extract::State};
use glyphcast_core::store::FrameStore;

use crate::{ApiState, metrics::MetricsSnapshot};

/// `GET /stats`
pub async fn handler<S>(State(state): State<ApiState<S>>) -> Json<MetricsSnapshot>
where
  S: FrameStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(state.metrics.snapshot())
}
