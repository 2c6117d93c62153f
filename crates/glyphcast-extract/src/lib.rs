//! Boundary to the external frame-extraction/ASCII-conversion pipeline.
//!
//! The pipeline itself is an opaque script that reads an uploaded video and
//! writes two sets of sequentially-numbered files: original frame images and
//! their ASCII-text renderings. This crate owns everything on the Rust side
//! of that boundary: the on-disk layout, the frame filename convention,
//! progress scanning over the output directories, detached script spawning,
//! and frame-text reading. Pure filesystem and process concerns; no HTTP or
//! database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use glyphcast_extract::{FrameDirs, scan_progress};
//!
//! # async fn demo() -> glyphcast_extract::Result<()> {
//! let dirs = FrameDirs::under(".");
//! let progress = scan_progress(&dirs, "1760789903437").await?;
//! println!("{}% ({} of {})", progress.percent, progress.ascii_count, progress.original_count);
//! # Ok(())
//! # }
//! ```

pub mod error;

mod frames;
mod layout;
mod pipeline;
mod progress;

pub use error::{Error, Result};
pub use frames::{FrameText, frame_image_file_name, frame_text_file_name, read_frame_text};
pub use layout::{FrameDirs, basename_of};
pub use pipeline::spawn_extraction;
pub use progress::{ExtractionProgress, scan_progress};
