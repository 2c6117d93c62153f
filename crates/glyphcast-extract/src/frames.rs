//! Frame file naming and ASCII-text reading.

use std::path::PathBuf;

use serde::Serialize;

use crate::{Error, Result, layout::FrameDirs};

/// ASCII rendering of frame `n`: `out` + n zero-padded to 4 digits +
/// `.jpg.txt`. The convention is fixed by the extraction script.
pub fn frame_text_file_name(frame_number: u32) -> String {
  format!("out{frame_number:04}.jpg.txt")
}

/// Original image of frame `n`: `out` + 4-digit n + `.jpg`.
pub fn frame_image_file_name(frame_number: u32) -> String {
  format!("out{frame_number:04}.jpg")
}

/// One frame's ASCII text, split into grid lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameText {
  pub frame_number: u32,
  pub file_name:    String,
  /// Raw file content, newlines included.
  pub content:      String,
  pub lines:        Vec<String>,
  pub line_count:   usize,
}

/// Read the ASCII text of one frame.
///
/// A missing file is [`Error::FrameNotFound`] — the caller-facing soft-404.
/// Lines are split on `\n` with a trailing `\r` stripped; a trailing newline
/// in the file therefore yields a final empty line, matching what the
/// conversion script emits.
pub async fn read_frame_text(
  dirs: &FrameDirs,
  basename: &str,
  frame_number: u32,
) -> Result<FrameText> {
  let file_name = frame_text_file_name(frame_number);
  let path: PathBuf = dirs.ascii_frames(basename).join(&file_name);

  let content = match tokio::fs::read_to_string(&path).await {
    Ok(content) => content,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(Error::FrameNotFound(file_name));
    }
    Err(e) => return Err(e.into()),
  };

  let lines: Vec<String> = content
    .split('\n')
    .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
    .collect();
  let line_count = lines.len();

  Ok(FrameText {
    frame_number,
    file_name,
    content,
    lines,
    line_count,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_are_zero_padded_to_four_digits() {
    assert_eq!(frame_text_file_name(0), "out0000.jpg.txt");
    assert_eq!(frame_text_file_name(42), "out0042.jpg.txt");
    assert_eq!(frame_text_file_name(9999), "out9999.jpg.txt");
    assert_eq!(frame_image_file_name(7), "out0007.jpg");
  }

  #[test]
  fn five_digit_frames_widen_rather_than_truncate() {
    assert_eq!(frame_text_file_name(12345), "out12345.jpg.txt");
  }

  #[tokio::test]
  async fn reads_and_splits_a_frame() {
    let root = tempfile::tempdir().unwrap();
    let dirs = FrameDirs::under(root.path());
    let frame_dir = dirs.ascii_frames("clip");
    std::fs::create_dir_all(&frame_dir).unwrap();
    std::fs::write(frame_dir.join("out0003.jpg.txt"), "@@@\n:::\n...").unwrap();

    let text = read_frame_text(&dirs, "clip", 3).await.unwrap();
    assert_eq!(text.file_name, "out0003.jpg.txt");
    assert_eq!(text.lines, vec!["@@@", ":::", "..."]);
    assert_eq!(text.line_count, 3);
  }

  #[tokio::test]
  async fn missing_frame_is_frame_not_found() {
    let root = tempfile::tempdir().unwrap();
    let dirs = FrameDirs::under(root.path());

    let err = read_frame_text(&dirs, "clip", 9999).await.unwrap_err();
    assert!(matches!(err, Error::FrameNotFound(name) if name == "out9999.jpg.txt"));
  }
}
