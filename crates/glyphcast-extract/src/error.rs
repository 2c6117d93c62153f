//! Error type for `glyphcast-extract`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The ASCII text file for a requested frame does not exist (yet).
  /// Soft condition: callers skip the frame rather than abort.
  #[error("frame file not found: {0}")]
  FrameNotFound(String),

  #[error("video file not found: {0}")]
  VideoNotFound(PathBuf),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
