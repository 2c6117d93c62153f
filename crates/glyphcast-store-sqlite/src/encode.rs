//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. UUIDs are stored as hyphenated
//! lowercase strings. Sizes and counts are stored as SQLite INTEGERs and
//! round-tripped through `i64`.

use chrono::{DateTime, Utc};
use glyphcast_core::video::VideoRecord;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ────────────────────────────────────────────────────────────────

/// Raw column values read directly from a `videos` row.
pub struct RawVideo {
  pub video_id:      String,
  pub title:         String,
  pub file_name:     String,
  pub file_path:     String,
  pub file_size:     i64,
  pub media_type:    String,
  pub content_hash:  String,
  pub src_width:     i64,
  pub src_height:    i64,
  pub out_width:     i64,
  pub out_height:    i64,
  pub src_fps:       f64,
  pub out_fps:       f64,
  pub frame_count:   Option<i64>,
  pub duration_secs: Option<f64>,
  pub uploaded_at:   String,
}

impl RawVideo {
  pub fn into_record(self) -> Result<VideoRecord> {
    Ok(VideoRecord {
      video_id:      decode_uuid(&self.video_id)?,
      title:         self.title,
      file_name:     self.file_name,
      file_path:     self.file_path,
      file_size:     self.file_size as u64,
      media_type:    self.media_type,
      content_hash:  self.content_hash,
      src_width:     self.src_width as u32,
      src_height:    self.src_height as u32,
      out_width:     self.out_width as u32,
      out_height:    self.out_height as u32,
      src_fps:       self.src_fps,
      out_fps:       self.out_fps,
      frame_count:   self.frame_count.map(|n| n as u32),
      duration_secs: self.duration_secs,
      uploaded_at:   decode_dt(&self.uploaded_at)?,
    })
  }
}
