//! Detached spawning of the extraction script.

use std::path::Path;

use tokio::process::Command;

use crate::{Error, Result, layout::FrameDirs};

/// Launch the extraction script for `video_path` and return immediately.
///
/// The script is invoked as
/// `<script> <video> <original-frames-dir> <ascii-frames-dir>` and runs to
/// completion (or failure) on its own: the child is not awaited, is not
/// killed when the handle drops, and there is no cancellation channel back
/// to it. Completion is observed only through
/// [`scan_progress`](crate::scan_progress).
///
/// Failing to find the video or to spawn the process is an error; anything
/// the script does after a successful spawn is invisible here.
pub async fn spawn_extraction(
  script: &Path,
  video_path: &Path,
  dirs: &FrameDirs,
) -> Result<u32> {
  if !tokio::fs::try_exists(video_path).await? {
    return Err(Error::VideoNotFound(video_path.to_path_buf()));
  }

  let child = Command::new(script)
    .arg(video_path)
    .arg(&dirs.original_dir)
    .arg(&dirs.ascii_dir)
    .spawn()?;

  // Unknown only if the child exited before we asked; either way it is
  // already detached.
  let pid = child.id().unwrap_or_default();
  tracing::info!(
    script = %script.display(),
    video = %video_path.display(),
    pid,
    "spawned extraction script"
  );

  Ok(pid)
}
