//! HTTP relay for glyphcast.
//!
//! Exposes an axum [`Router`] combining the upload/extraction relay
//! endpoints with the store-backed JSON API from [`glyphcast_api`], all
//! mounted under `/api`. The relay is the only component that touches the
//! filesystem and the extraction script; everything store-shaped lives in
//! the API crate.

pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use glyphcast_api::ApiState;
use glyphcast_core::store::FrameStore;
use glyphcast_extract::FrameDirs;
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GLYPHCAST_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:        String,
  #[serde(default = "default_port")]
  pub port:        u16,
  /// Root under which `uploads/` and the two frame directories live.
  #[serde(default = "default_data_dir")]
  pub data_dir:    PathBuf,
  #[serde(default = "default_store_path")]
  pub store_path:  PathBuf,
  /// The external extraction script, invoked detached per processed video.
  #[serde(default = "default_script_path")]
  pub script_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }
fn default_data_dir() -> PathBuf { PathBuf::from(".") }
fn default_store_path() -> PathBuf { PathBuf::from("glyphcast.db") }
fn default_script_path() -> PathBuf { PathBuf::from("scripts/extract-frames.sh") }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all relay handlers.
#[derive(Clone)]
pub struct AppState<S: FrameStore> {
  pub api:    ApiState<S>,
  pub config: Arc<ServerConfig>,
  pub dirs:   Arc<FrameDirs>,
  /// Basename of the most recent `process-video` call; `getFile` resolves
  /// frame files against it. Explicit process-scoped state, not a loose
  /// global.
  pub active_basename: Arc<RwLock<Option<String>>>,
}

impl<S: FrameStore> AppState<S> {
  pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
    let dirs = FrameDirs::under(&config.data_dir);
    Self {
      api: ApiState::new(store),
      config: Arc::new(config),
      dirs: Arc::new(dirs),
      active_basename: Arc::new(RwLock::new(None)),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full axum [`Router`]: relay endpoints plus the JSON API, all
/// under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: FrameStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let api = glyphcast_api::api_router(state.api.clone());

  let relay = Router::new()
    .route("/upload", post(handlers::upload::handler::<S>))
    .route("/upload-url", post(handlers::upload::upload_url))
    .route("/process-video", post(handlers::process::handler::<S>))
    .route(
      "/processing-progress/{video_basename}",
      get(handlers::progress::handler::<S>),
    )
    .route("/getFile", post(handlers::get_file::handler::<S>))
    .with_state(state);

  Router::new()
    .nest("/api", relay.merge(api))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{path::Path, sync::Arc};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use glyphcast_store_sqlite::SqliteStore;
  use sha2::{Digest as _, Sha256};
  use tower::ServiceExt as _;

  use super::*;

  async fn make_state(root: &Path) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let config = ServerConfig {
      host:        "127.0.0.1".to_string(),
      port:        3001,
      data_dir:    root.to_path_buf(),
      store_path:  PathBuf::from(":memory:"),
      script_path: PathBuf::from("/bin/true"),
    };
    AppState::new(Arc::new(store), config)
  }

  async fn oneshot_json(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<serde_json::Value>,
  ) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      serde_json::Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn write_ascii_frame(root: &Path, basename: &str, frame: u32, content: &str) {
    let dir = FrameDirs::under(root).ascii_frames(basename);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("out{frame:04}.jpg.txt")), content).unwrap();
  }

  // ── Progress ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn progress_for_unknown_basename_is_all_zero() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let (status, body) =
      oneshot_json(state, "GET", "/api/processing-progress/nope", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["originalCount"], 0);
    assert_eq!(body["asciiCount"], 0);
    assert_eq!(body["progress"], 0);
    assert_eq!(body["isComplete"], false);
  }

  #[tokio::test]
  async fn progress_counts_extraction_output() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;
    let dirs = FrameDirs::under(root.path());

    let originals = dirs.original_frames("clip");
    std::fs::create_dir_all(&originals).unwrap();
    for i in 0..4 {
      std::fs::write(originals.join(format!("out{i:04}.jpg")), b"").unwrap();
    }
    write_ascii_frame(root.path(), "clip", 0, "@@");
    write_ascii_frame(root.path(), "clip", 1, "@@");

    let (status, body) =
      oneshot_json(state, "GET", "/api/processing-progress/clip", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["originalCount"], 4);
    assert_eq!(body["asciiCount"], 2);
    assert_eq!(body["progress"], 50);
    assert_eq!(body["isComplete"], false);
  }

  // ── getFile ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_file_without_processed_video_is_conflict() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let (status, _) = oneshot_json(
      state,
      "POST",
      "/api/getFile",
      Some(serde_json::json!({ "frameNumber": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn get_file_missing_frame_is_404_and_grid_untouched() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    // Pre-populate a grid so we can observe it is left alone.
    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/api/frames/reset",
      Some(serde_json::json!({ "lineCount": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/api/getFile",
      Some(serde_json::json!({ "frameNumber": 9999, "videoBasename": "clip" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, lines) = oneshot_json(state, "GET", "/api/frames", None).await;
    let lines = lines.as_array().unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l["frameNumber"] == -1 && l["content"] == " "));
  }

  #[tokio::test]
  async fn get_file_returns_frame_text() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;
    write_ascii_frame(root.path(), "clip", 12, "@@@\n:::");

    let (status, body) = oneshot_json(
      state,
      "POST",
      "/api/getFile",
      Some(serde_json::json!({ "frameNumber": 12, "videoBasename": "clip" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["frameNumber"], 12);
    assert_eq!(body["fileName"], "out0012.jpg.txt");
    assert_eq!(body["content"], "@@@\n:::");
    assert_eq!(body["lines"], serde_json::json!(["@@@", ":::"]));
    assert_eq!(body["lineCount"], 2);
  }

  // ── process-video ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn process_video_missing_file_is_404() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let missing = root.path().join("uploads/ghost.mp4");
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/api/process-video",
      Some(serde_json::json!({ "filePath": missing.to_string_lossy() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn process_video_responds_immediately_and_sets_active_basename() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let upload_dir = root.path().join("uploads");
    std::fs::create_dir_all(&upload_dir).unwrap();
    let video = upload_dir.join("1760789903437.mp4");
    std::fs::write(&video, b"not really a video").unwrap();

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/api/process-video",
      Some(serde_json::json!({ "filePath": video.to_string_lossy() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["videoBasename"], "1760789903437");

    // getFile now resolves against the active basename: a missing frame is
    // a 404, no longer the no-active-video conflict.
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/api/getFile",
      Some(serde_json::json!({ "frameNumber": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Nested JSON API ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn frames_reset_patch_read_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    oneshot_json(
      state.clone(),
      "POST",
      "/api/frames/reset",
      Some(serde_json::json!({ "lineCount": 3 })),
    )
    .await;

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/api/frames/lines",
      Some(serde_json::json!({
        "frameNumber": 4,
        "updates": [
          { "lineNumber": 0, "content": "@@@" },
          { "lineNumber": 2, "content": "..." },
          { "lineNumber": 9, "content": "dropped" },
        ],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 2);

    let (_, lines) = oneshot_json(state.clone(), "GET", "/api/frames", None).await;
    let lines = lines.as_array().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["content"], "@@@");
    assert_eq!(lines[1]["content"], " ");
    assert_eq!(lines[2]["content"], "...");

    let (status, line) = oneshot_json(state, "GET", "/api/frames/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(line["frameNumber"], 4);
  }

  #[tokio::test]
  async fn upload_url_points_at_the_relay() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let (status, body) = oneshot_json(state, "POST", "/api/upload-url", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "/api/upload");
  }

  #[tokio::test]
  async fn unknown_video_id_is_404() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let uri = format!("/api/videos/{}", uuid::Uuid::new_v4());
    let (status, _) = oneshot_json(state, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn videos_create_and_list() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let (status, created) = oneshot_json(
      state.clone(),
      "POST",
      "/api/videos",
      Some(serde_json::json!({
        "title": "clip",
        "fileName": "clip.mp4",
        "filePath": "uploads/1760789903437.mp4",
        "fileSize": 2048,
        "mediaType": "video/mp4",
        "contentHash": "abc123",
        "srcWidth": 640,
        "srcHeight": 480,
        "srcFps": 30.0,
        "frameCount": 150,
        "durationSecs": 5.0,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["outWidth"], 640);
    assert_eq!(created["outFps"], 30.0);

    let (status, listed) = oneshot_json(state, "GET", "/api/videos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
  }

  // ── Upload ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn upload_stores_file_and_hashes_it() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let payload = b"fake video bytes";
    let boundary = "glyphcast-test-boundary";
    let body = format!(
      "--{boundary}\r\n\
       Content-Disposition: form-data; name=\"file\"; filename=\"clip.mp4\"\r\n\
       Content-Type: video/mp4\r\n\r\n\
       {}\r\n\
       --{boundary}--\r\n",
      std::str::from_utf8(payload).unwrap(),
    );

    let req = Request::builder()
      .method("POST")
      .uri("/api/upload")
      .header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={boundary}"),
      )
      .body(Body::from(body))
      .unwrap();

    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let stored = PathBuf::from(json["filePath"].as_str().unwrap());
    assert_eq!(std::fs::read(&stored).unwrap(), payload);
    assert_eq!(json["fileName"], "clip.mp4");
    assert_eq!(json["fileSize"], payload.len());
    assert_eq!(
      json["contentHash"].as_str().unwrap(),
      hex::encode(Sha256::digest(payload)),
    );
    // Stored as <basename>.<original extension>.
    assert_eq!(stored.extension().unwrap(), "mp4");

    let (_, stats) = oneshot_json(state, "GET", "/api/stats", None).await;
    assert_eq!(stats["uploads"], 1);
  }

  #[tokio::test]
  async fn upload_without_file_field_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    let state = make_state(root.path()).await;

    let boundary = "glyphcast-test-boundary";
    let body = format!(
      "--{boundary}\r\n\
       Content-Disposition: form-data; name=\"title\"\r\n\r\n\
       no file here\r\n\
       --{boundary}--\r\n",
    );

    let req = Request::builder()
      .method("POST")
      .uri("/api/upload")
      .header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={boundary}"),
      )
      .body(Body::from(body))
      .unwrap();

    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }
}
