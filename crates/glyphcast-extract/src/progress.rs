//! Progress scanning over the extraction output directories.
//!
//! Progress is inferred entirely from file counts: the script writes one
//! image per extracted frame, then one text file per converted frame. There
//! is no push channel from the script; clients poll.

use std::path::Path;

use serde::Serialize;

use crate::{Result, layout::FrameDirs};

/// A snapshot of extraction progress for one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionProgress {
  pub original_count: usize,
  pub ascii_count:    usize,
  /// `round(ascii / original × 100)`, clamped to 100; 0 while no originals
  /// have been extracted.
  #[serde(rename = "progress")]
  pub percent:        u8,
  pub is_complete:    bool,
}

impl ExtractionProgress {
  /// Derive the percentage and completion flag from raw counts.
  pub fn from_counts(original_count: usize, ascii_count: usize) -> Self {
    let percent = if original_count == 0 {
      0
    } else {
      let ratio = ascii_count as f64 / original_count as f64;
      (ratio * 100.0).round().min(100.0) as u8
    };

    Self {
      original_count,
      ascii_count,
      percent,
      is_complete: ascii_count > 0 && ascii_count == original_count,
    }
  }
}

/// Count extraction output files for `basename`.
///
/// Images (`.jpg`) are counted in the original-frames subdirectory, text
/// renderings (`.txt`) in the ascii-frames subdirectory. A directory that
/// does not exist yet counts as zero; it is never an error — the script may
/// simply not have created it.
pub async fn scan_progress(dirs: &FrameDirs, basename: &str) -> Result<ExtractionProgress> {
  let original_count = count_files_with_suffix(&dirs.original_frames(basename), ".jpg").await?;
  let ascii_count    = count_files_with_suffix(&dirs.ascii_frames(basename), ".txt").await?;
  Ok(ExtractionProgress::from_counts(original_count, ascii_count))
}

async fn count_files_with_suffix(dir: &Path, suffix: &str) -> Result<usize> {
  let mut entries = match tokio::fs::read_dir(dir).await {
    Ok(entries) => entries,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
    Err(e) => return Err(e.into()),
  };

  let mut count = 0;
  while let Some(entry) = entries.next_entry().await? {
    if entry.file_name().to_string_lossy().ends_with(suffix) {
      count += 1;
    }
  }
  Ok(count)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_originals_is_zero_percent_regardless_of_ascii() {
    let p = ExtractionProgress::from_counts(0, 0);
    assert_eq!(p.percent, 0);
    assert!(!p.is_complete);

    // Pathological but observable mid-wipe: text files with no images.
    let p = ExtractionProgress::from_counts(0, 12);
    assert_eq!(p.percent, 0);
    assert!(!p.is_complete);
  }

  #[test]
  fn percent_rounds_and_stays_in_range() {
    assert_eq!(ExtractionProgress::from_counts(3, 1).percent, 33);
    assert_eq!(ExtractionProgress::from_counts(3, 2).percent, 67);
    assert_eq!(ExtractionProgress::from_counts(200, 1).percent, 1);
    // More text files than images clamps rather than overflowing.
    assert_eq!(ExtractionProgress::from_counts(2, 5).percent, 100);
  }

  #[test]
  fn complete_iff_nonzero_and_equal() {
    assert!(ExtractionProgress::from_counts(10, 10).is_complete);
    assert!(!ExtractionProgress::from_counts(10, 9).is_complete);
    assert!(!ExtractionProgress::from_counts(0, 0).is_complete);
  }

  #[tokio::test]
  async fn scan_counts_only_matching_suffixes() {
    let root = tempfile::tempdir().unwrap();
    let dirs = FrameDirs::under(root.path());

    let originals = dirs.original_frames("clip");
    let ascii     = dirs.ascii_frames("clip");
    std::fs::create_dir_all(&originals).unwrap();
    std::fs::create_dir_all(&ascii).unwrap();

    for i in 0..4 {
      std::fs::write(originals.join(format!("out{i:04}.jpg")), b"").unwrap();
    }
    std::fs::write(originals.join("notes.md"), b"").unwrap();
    for i in 0..2 {
      std::fs::write(ascii.join(format!("out{i:04}.jpg.txt")), b"").unwrap();
    }

    let p = scan_progress(&dirs, "clip").await.unwrap();
    assert_eq!(p.original_count, 4);
    assert_eq!(p.ascii_count, 2);
    assert_eq!(p.percent, 50);
    assert!(!p.is_complete);
  }

  #[tokio::test]
  async fn missing_directories_scan_as_zero() {
    let root = tempfile::tempdir().unwrap();
    let dirs = FrameDirs::under(root.path());

    let p = scan_progress(&dirs, "never-processed").await.unwrap();
    assert_eq!(p.original_count, 0);
    assert_eq!(p.ascii_count, 0);
    assert_eq!(p.percent, 0);
    assert!(!p.is_complete);
  }
}
