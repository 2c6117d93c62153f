//! Async HTTP client wrapping the glyphcast relay and JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use glyphcast_core::{frame::FrameLine, video::VideoRecord};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Connection settings for the glyphcast server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Extraction progress as reported by `processing-progress`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInfo {
  pub original_count: usize,
  pub ascii_count:    usize,
  #[serde(rename = "progress")]
  pub percent:        u8,
  pub is_complete:    bool,
}

/// One frame's ASCII text as served by `getFile`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameFile {
  pub frame_number: u32,
  pub file_name:    String,
  pub lines:        Vec<String>,
  pub line_count:   usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct BatchResult {
  updated: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResult {
  video_basename: String,
}

/// Result of a multipart upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
  pub file_path:      String,
  pub file_name:      String,
  pub video_basename: String,
  pub file_size:      u64,
  pub content_hash:   String,
}

/// Async HTTP client for the glyphcast server.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Videos ────────────────────────────────────────────────────────────────

  /// `GET /api/videos`
  pub async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
    let resp = self
      .client
      .get(self.url("/videos"))
      .send()
      .await
      .context("GET /videos failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /videos → {}", resp.status()));
    }
    resp.json().await.context("deserialising videos")
  }

  /// `POST /api/videos`
  pub async fn save_video(&self, body: serde_json::Value) -> Result<VideoRecord> {
    let resp = self
      .client
      .post(self.url("/videos"))
      .json(&body)
      .send()
      .await
      .context("POST /videos failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /videos → {}", resp.status()));
    }
    resp.json().await.context("deserialising saved video")
  }

  // ── Upload / extraction ───────────────────────────────────────────────────

  /// `POST /api/upload` — multipart form, field `file`.
  pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResult> {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = self
      .client
      .post(self.url("/upload"))
      .multipart(form)
      .send()
      .await
      .context("POST /upload failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /upload → {}", resp.status()));
    }
    resp.json().await.context("deserialising upload result")
  }

  /// `POST /api/process-video` — returns the video basename to poll.
  pub async fn process_video(&self, file_path: &str) -> Result<String> {
    let resp = self
      .client
      .post(self.url("/process-video"))
      .json(&serde_json::json!({ "filePath": file_path }))
      .send()
      .await
      .context("POST /process-video failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /process-video → {}", resp.status()));
    }
    let result: ProcessResult = resp.json().await.context("deserialising process result")?;
    Ok(result.video_basename)
  }

  /// `GET /api/processing-progress/:basename`
  pub async fn progress(&self, basename: &str) -> Result<ProgressInfo> {
    let resp = self
      .client
      .get(self.url(&format!("/processing-progress/{basename}")))
      .send()
      .await
      .context("GET /processing-progress failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /processing-progress → {}", resp.status()));
    }
    resp.json().await.context("deserialising progress")
  }

  // ── Frame sync ────────────────────────────────────────────────────────────

  /// `POST /api/getFile` — `Ok(None)` when the frame file does not exist,
  /// the expected soft-skip during playback.
  pub async fn get_file(&self, frame_number: u32) -> Result<Option<FrameFile>> {
    let resp = self
      .client
      .post(self.url("/getFile"))
      .json(&serde_json::json!({ "frameNumber": frame_number }))
      .send()
      .await
      .context("POST /getFile failed")?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !resp.status().is_success() {
      return Err(anyhow!("POST /getFile → {}", resp.status()));
    }
    Ok(Some(resp.json().await.context("deserialising frame file")?))
  }

  /// `POST /api/frames/reset`
  pub async fn reset_frames(&self, line_count: usize) -> Result<()> {
    let resp = self
      .client
      .post(self.url("/frames/reset"))
      .json(&serde_json::json!({ "lineCount": line_count }))
      .send()
      .await
      .context("POST /frames/reset failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /frames/reset → {}", resp.status()));
    }
    Ok(())
  }

  /// `POST /api/frames/lines` — returns the number of rows updated.
  pub async fn push_lines(&self, frame_number: u32, lines: &[String]) -> Result<usize> {
    let updates: Vec<serde_json::Value> = lines
      .iter()
      .enumerate()
      .map(|(i, content)| serde_json::json!({ "lineNumber": i, "content": content }))
      .collect();

    let resp = self
      .client
      .post(self.url("/frames/lines"))
      .json(&serde_json::json!({
        "frameNumber": frame_number,
        "updates": updates,
      }))
      .send()
      .await
      .context("POST /frames/lines failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /frames/lines → {}", resp.status()));
    }
    let result: BatchResult = resp.json().await.context("deserialising batch result")?;
    Ok(result.updated)
  }

  /// `GET /api/frames` — the full grid, ordered by line number.
  pub async fn all_frames(&self) -> Result<Vec<FrameLine>> {
    let resp = self
      .client
      .get(self.url("/frames"))
      .send()
      .await
      .context("GET /frames failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /frames → {}", resp.status()));
    }
    resp.json().await.context("deserialising frames")
  }
}
