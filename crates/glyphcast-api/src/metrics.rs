//! Process-scoped throughput counters.
//!
//! The whole point of the demo is to show store write/query throughput, so
//! the counters live behind one explicit collector rather than loose
//! statics. Relaxed ordering: the numbers are display-only.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct Metrics {
  uploads:              AtomicU64,
  extractions_spawned:  AtomicU64,
  frame_files_served:   AtomicU64,
  line_rows_written:    AtomicU64,
  frame_queries_served: AtomicU64,
}

/// A point-in-time copy of all counters, as served by `GET /stats`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
  pub uploads:              u64,
  pub extractions_spawned:  u64,
  pub frame_files_served:   u64,
  pub line_rows_written:    u64,
  pub frame_queries_served: u64,
}

impl Metrics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_upload(&self) {
    self.uploads.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_extraction_spawned(&self) {
    self.extractions_spawned.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_frame_file_served(&self) {
    self.frame_files_served.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_line_rows_written(&self, rows: u64) {
    self.line_rows_written.fetch_add(rows, Ordering::Relaxed);
  }

  pub fn record_frame_query(&self) {
    self.frame_queries_served.fetch_add(1, Ordering::Relaxed);
  }

  pub fn snapshot(&self) -> MetricsSnapshot {
    MetricsSnapshot {
      uploads:              self.uploads.load(Ordering::Relaxed),
      extractions_spawned:  self.extractions_spawned.load(Ordering::Relaxed),
      frame_files_served:   self.frame_files_served.load(Ordering::Relaxed),
      line_rows_written:    self.line_rows_written.load(Ordering::Relaxed),
      frame_queries_served: self.frame_queries_served.load(Ordering::Relaxed),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counters_accumulate() {
    let m = Metrics::new();
    m.record_upload();
    m.record_line_rows_written(40);
    m.record_line_rows_written(2);
    m.record_frame_query();
    m.record_frame_query();

    let snap = m.snapshot();
    assert_eq!(snap.uploads, 1);
    assert_eq!(snap.line_rows_written, 42);
    assert_eq!(snap.frame_queries_served, 2);
    assert_eq!(snap.extractions_spawned, 0);
  }
}
