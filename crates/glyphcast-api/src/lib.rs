//! JSON API for the glyphcast frame store.
//!
//! Exposes an axum [`Router`] backed by any [`glyphcast_core::store::FrameStore`].
//! Transport concerns (upload relay, extraction endpoints, tracing layers)
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", glyphcast_api::api_router(state.clone()))
//! ```

pub mod barrier;
pub mod error;
pub mod frames;
pub mod metrics;
pub mod stats;
pub mod videos;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use glyphcast_core::store::FrameStore;

pub use barrier::ResetBarrier;
pub use error::ApiError;
pub use metrics::Metrics;

/// Shared state threaded through all API handlers.
#[derive(Clone)]
pub struct ApiState<S: FrameStore> {
  pub store:   Arc<S>,
  /// Single-writer token ordering grid resets against in-flight patches.
  pub barrier: Arc<ResetBarrier>,
  pub metrics: Arc<Metrics>,
}

impl<S: FrameStore> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      barrier: Arc::new(ResetBarrier::new()),
      metrics: Arc::new(Metrics::new()),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: FrameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Videos
    .route("/videos", get(videos::list::<S>).post(videos::create::<S>))
    .route("/videos/{id}", get(videos::get_one::<S>))
    // Frame grid
    .route("/frames", get(frames::list::<S>))
    .route("/frames/reset", post(frames::reset::<S>))
    .route("/frames/lines", post(frames::update_lines::<S>))
    .route("/frames/{line_number}", get(frames::get_one::<S>))
    // Metrics
    .route("/stats", get(stats::handler::<S>))
    .with_state(state)
}
