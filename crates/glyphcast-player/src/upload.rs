//! The non-interactive `upload` subcommand: push a local video through the
//! relay and save its metadata.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glyphcast_core::media::{estimated_frame_count, parse_fps, parse_resolution};

use crate::client::ApiClient;

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
  /// The video file to upload.
  pub file: PathBuf,

  /// Display title; defaults to the file name without extension.
  #[arg(long)]
  pub title: Option<String>,

  /// Source resolution as `WIDTHxHEIGHT`, e.g. `1920x1080`.
  #[arg(long, default_value = "Unknown")]
  pub resolution: String,

  /// Source frame rate, e.g. `30 fps`.
  #[arg(long, default_value = "30 fps")]
  pub fps: String,

  /// Clip duration in seconds.
  #[arg(long)]
  pub duration: Option<f64>,
}

/// Upload the file, then save a video record pointing at the stored path.
pub async fn run(client: &ApiClient, args: UploadArgs) -> Result<()> {
  let bytes = tokio::fs::read(&args.file)
    .await
    .with_context(|| format!("reading {}", args.file.display()))?;
  let file_name = args
    .file
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .context("file path has no file name")?;

  let uploaded = client.upload(&file_name, bytes).await?;

  let (src_width, src_height) = parse_resolution(&args.resolution);
  let src_fps = parse_fps(&args.fps);
  let frame_count = args.duration.map(|d| estimated_frame_count(d, src_fps));
  let title = args.title.clone().unwrap_or_else(|| {
    args
      .file
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_else(|| file_name.clone())
  });

  let video = client
    .save_video(serde_json::json!({
      "title": title,
      "fileName": uploaded.file_name,
      "filePath": uploaded.file_path,
      "fileSize": uploaded.file_size,
      "mediaType": guess_media_type(&file_name),
      "contentHash": uploaded.content_hash,
      "srcWidth": src_width,
      "srcHeight": src_height,
      "srcFps": src_fps,
      "frameCount": frame_count,
      "durationSecs": args.duration,
    }))
    .await?;

  println!("uploaded {} → {}", file_name, uploaded.file_path);
  println!("video id {}", video.video_id);
  println!("basename {}", uploaded.video_basename);
  Ok(())
}

fn guess_media_type(file_name: &str) -> &'static str {
  match file_name.rsplit('.').next() {
    Some("mp4") | Some("m4v") => "video/mp4",
    Some("webm") => "video/webm",
    Some("mov") => "video/quicktime",
    Some("mkv") => "video/x-matroska",
    _ => "application/octet-stream",
  }
}
