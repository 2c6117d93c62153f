//! Video metadata — the record created once per upload.
//!
//! A video record is immutable after creation. The output resolution and fps
//! fields mirror the source values at creation time; a future transcoding
//! step would diverge them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted metadata for one uploaded video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
  pub video_id:      Uuid,
  pub title:         String,
  /// Original client-side file name, e.g. `clip.mp4`.
  pub file_name:     String,
  /// Path where the upload relay stored the bytes.
  pub file_path:     String,
  pub file_size:     u64,
  /// MIME type as reported at upload, e.g. `video/mp4`.
  pub media_type:    String,
  /// SHA-256 hex digest of the uploaded bytes.
  pub content_hash:  String,
  pub src_width:     u32,
  pub src_height:    u32,
  pub out_width:     u32,
  pub out_height:    u32,
  pub src_fps:       f64,
  pub out_fps:       f64,
  /// Estimated total frame count (`floor(duration × fps)`), if known.
  pub frame_count:   Option<u32>,
  pub duration_secs: Option<f64>,
  /// Server-assigned timestamp; listing is ordered by this, newest first.
  pub uploaded_at:   DateTime<Utc>,
}

/// Input to [`crate::store::FrameStore::save_video`].
/// `video_id` and `uploaded_at` are always set by the store; the output
/// resolution and fps are duplicated from the source fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
  pub title:         String,
  pub file_name:     String,
  pub file_path:     String,
  pub file_size:     u64,
  pub media_type:    String,
  pub content_hash:  String,
  pub src_width:     u32,
  pub src_height:    u32,
  pub src_fps:       f64,
  pub frame_count:   Option<u32>,
  pub duration_secs: Option<f64>,
}

impl NewVideo {
  /// Materialise the full record, assigning id, timestamp, and the mirrored
  /// output fields.
  pub fn into_record(self, video_id: Uuid, uploaded_at: DateTime<Utc>) -> VideoRecord {
    VideoRecord {
      video_id,
      title: self.title,
      file_name: self.file_name,
      file_path: self.file_path,
      file_size: self.file_size,
      media_type: self.media_type,
      content_hash: self.content_hash,
      src_width: self.src_width,
      src_height: self.src_height,
      out_width: self.src_width,
      out_height: self.src_height,
      src_fps: self.src_fps,
      out_fps: self.src_fps,
      frame_count: self.frame_count,
      duration_secs: self.duration_secs,
      uploaded_at,
    }
  }
}
