//! Frame lines — the per-line rows of the ASCII rendering grid.
//!
//! The grid holds exactly one frame's worth of rows at any time. Playback
//! overwrites the rows in place; it never accumulates frames. Uniqueness of
//! `line_number` is an application-level upsert discipline, not a schema
//! constraint — see [`crate::store::FrameStore::apply_line_updates`].

use serde::{Deserialize, Serialize};

/// Frame number a placeholder row carries before any real frame is written.
pub const SENTINEL_FRAME: i64 = -1;

/// Content of a freshly-initialised placeholder row.
pub const PLACEHOLDER_CONTENT: &str = " ";

/// One row of the ASCII grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLine {
  pub line_number:  u32,
  /// The frame this row's content was taken from; [`SENTINEL_FRAME`] until
  /// the first update.
  pub frame_number: i64,
  pub content:      String,
}

/// One entry of a batched line patch: new content for an existing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineUpdate {
  pub line_number: u32,
  pub content:     String,
}

/// Join rows into displayable text with newline separators.
///
/// Callers are expected to pass rows already ordered by line number, as
/// returned by [`crate::store::FrameStore::all_lines`].
pub fn join_lines(lines: &[FrameLine]) -> String {
  lines
    .iter()
    .map(|l| l.content.as_str())
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn join_preserves_order_and_separators() {
    let lines: Vec<FrameLine> = ["@@@", " . ", "   "]
      .iter()
      .enumerate()
      .map(|(i, c)| FrameLine {
        line_number:  i as u32,
        frame_number: 4,
        content:      (*c).to_string(),
      })
      .collect();

    assert_eq!(join_lines(&lines), "@@@\n . \n   ");
  }

  #[test]
  fn join_of_empty_grid_is_empty() {
    assert_eq!(join_lines(&[]), "");
  }
}
