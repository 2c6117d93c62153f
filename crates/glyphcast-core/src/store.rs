//! The `FrameStore` trait.
//!
//! Implemented by storage backends (e.g. `glyphcast-store-sqlite`). Higher
//! layers (`glyphcast-api`, `glyphcast-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  frame::{FrameLine, LineUpdate},
  video::{NewVideo, VideoRecord},
};

/// Abstraction over a glyphcast storage backend.
///
/// Videos are write-once. The frame-line table is a fixed-size grid: it is
/// destructively re-initialised once per playback session and then patched
/// in place, row by row, as playback advances. Synchronising the reset
/// against in-flight patches is the *caller's* job (see the reset barrier in
/// `glyphcast-api`); the store itself promises no isolation.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FrameStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Videos ────────────────────────────────────────────────────────────

  /// Persist metadata for an uploaded video. The id and upload timestamp
  /// are set by the store; output resolution/fps mirror the source values.
  fn save_video(
    &self,
    input: NewVideo,
  ) -> impl Future<Output = Result<VideoRecord, Self::Error>> + Send + '_;

  /// Retrieve a video record by id. Returns `None` if not found.
  fn get_video(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<VideoRecord>, Self::Error>> + Send + '_;

  /// List all video records, newest upload first.
  fn list_videos(
    &self,
  ) -> impl Future<Output = Result<Vec<VideoRecord>, Self::Error>> + Send + '_;

  // ── Frame grid ────────────────────────────────────────────────────────

  /// Delete every frame-line row, then insert `line_count` placeholder rows
  /// (content [`PLACEHOLDER_CONTENT`], frame [`SENTINEL_FRAME`]) numbered
  /// `0..line_count`.
  ///
  /// [`PLACEHOLDER_CONTENT`]: crate::frame::PLACEHOLDER_CONTENT
  /// [`SENTINEL_FRAME`]: crate::frame::SENTINEL_FRAME
  fn reset_frame_table(
    &self,
    line_count: u32,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Patch existing rows by line number with content from `frame_number`.
  ///
  /// Updates with no matching row are silently skipped. No ordering or
  /// atomicity is guaranteed among the updates of one call; a concurrent
  /// reader may observe a mix of old and new content. Returns the number of
  /// rows actually updated.
  fn apply_line_updates<'a>(
    &'a self,
    frame_number: i64,
    updates: &'a [LineUpdate],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// All rows, ordered by line number ascending.
  fn all_lines(
    &self,
  ) -> impl Future<Output = Result<Vec<FrameLine>, Self::Error>> + Send + '_;

  /// A single row by line number. Returns `None` if not found.
  fn line(
    &self,
    line_number: u32,
  ) -> impl Future<Output = Result<Option<FrameLine>, Self::Error>> + Send + '_;
}
