//! Integration tests for `SqliteStore` against an in-memory database.

use glyphcast_core::{
  frame::{LineUpdate, SENTINEL_FRAME, join_lines},
  store::FrameStore,
  video::NewVideo,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_video(title: &str) -> NewVideo {
  NewVideo {
    title:         title.into(),
    file_name:     format!("{title}.mp4"),
    file_path:     format!("uploads/{title}.mp4"),
    file_size:     1_048_576,
    media_type:    "video/mp4".into(),
    content_hash:  "e3b0c44298fc1c149afbf4c8996fb924".into(),
    src_width:     640,
    src_height:    480,
    src_fps:       30.0,
    frame_count:   Some(150),
    duration_secs: Some(5.0),
  }
}

fn updates(pairs: &[(u32, &str)]) -> Vec<LineUpdate> {
  pairs
    .iter()
    .map(|(n, c)| LineUpdate {
      line_number: *n,
      content:     (*c).to_string(),
    })
    .collect()
}

// ─── Videos ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_video() {
  let s = store().await;

  let saved = s.save_video(new_video("clip")).await.unwrap();
  assert_eq!(saved.title, "clip");
  // Output fields mirror source values at creation.
  assert_eq!(saved.out_width, saved.src_width);
  assert_eq!(saved.out_height, saved.src_height);
  assert_eq!(saved.out_fps, saved.src_fps);

  let fetched = s.get_video(saved.video_id).await.unwrap().unwrap();
  assert_eq!(fetched.video_id, saved.video_id);
  assert_eq!(fetched.file_size, 1_048_576);
  assert_eq!(fetched.frame_count, Some(150));
  assert_eq!(fetched.uploaded_at, saved.uploaded_at);
}

#[tokio::test]
async fn get_video_missing_returns_none() {
  let s = store().await;
  assert!(s.get_video(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_videos_newest_first() {
  let s = store().await;
  s.save_video(new_video("first")).await.unwrap();
  s.save_video(new_video("second")).await.unwrap();
  s.save_video(new_video("third")).await.unwrap();

  let all = s.list_videos().await.unwrap();
  assert_eq!(all.len(), 3);
  for pair in all.windows(2) {
    assert!(pair[0].uploaded_at >= pair[1].uploaded_at);
  }
}

// ─── Frame grid: reset ───────────────────────────────────────────────────────

#[tokio::test]
async fn reset_creates_placeholder_rows() {
  let s = store().await;
  s.reset_frame_table(4).await.unwrap();

  let lines = s.all_lines().await.unwrap();
  assert_eq!(lines.len(), 4);
  for (i, line) in lines.iter().enumerate() {
    assert_eq!(line.line_number, i as u32);
    assert_eq!(line.frame_number, SENTINEL_FRAME);
    assert_eq!(line.content, " ");
  }
}

#[tokio::test]
async fn reset_with_zero_lines_empties_the_grid() {
  let s = store().await;
  s.reset_frame_table(5).await.unwrap();
  s.reset_frame_table(0).await.unwrap();
  assert!(s.all_lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_replaces_previous_grid() {
  let s = store().await;
  s.reset_frame_table(10).await.unwrap();
  s.apply_line_updates(7, &updates(&[(3, "xxx")])).await.unwrap();

  // Shrinking the grid discards all previous rows, patched or not.
  s.reset_frame_table(2).await.unwrap();
  let lines = s.all_lines().await.unwrap();
  assert_eq!(lines.len(), 2);
  assert!(lines.iter().all(|l| l.frame_number == SENTINEL_FRAME));
}

// ─── Frame grid: batched patch ───────────────────────────────────────────────

#[tokio::test]
async fn partial_batch_leaves_other_rows_untouched() {
  let s = store().await;
  s.reset_frame_table(3).await.unwrap();

  let n = s
    .apply_line_updates(0, &updates(&[(0, "a"), (2, "b")]))
    .await
    .unwrap();
  assert_eq!(n, 2);

  let lines = s.all_lines().await.unwrap();
  assert_eq!(lines[0].content, "a");
  assert_eq!(lines[0].frame_number, 0);
  assert_eq!(lines[1].content, " ");
  assert_eq!(lines[1].frame_number, SENTINEL_FRAME);
  assert_eq!(lines[2].content, "b");
  assert_eq!(lines[2].frame_number, 0);
}

#[tokio::test]
async fn updates_for_missing_lines_are_skipped() {
  let s = store().await;
  s.reset_frame_table(2).await.unwrap();

  let n = s
    .apply_line_updates(1, &updates(&[(1, "kept"), (9, "dropped")]))
    .await
    .unwrap();
  assert_eq!(n, 1);

  let lines = s.all_lines().await.unwrap();
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[1].content, "kept");
}

#[tokio::test]
async fn repatching_a_line_overwrites_in_place() {
  let s = store().await;
  s.reset_frame_table(1).await.unwrap();

  s.apply_line_updates(0, &updates(&[(0, "frame zero")])).await.unwrap();
  s.apply_line_updates(2, &updates(&[(0, "frame two")])).await.unwrap();

  // Still one row: the grid is overwritten per frame, never accumulated.
  let lines = s.all_lines().await.unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].content, "frame two");
  assert_eq!(lines[0].frame_number, 2);
}

// ─── Frame grid: reads ───────────────────────────────────────────────────────

#[tokio::test]
async fn full_update_round_trips_through_join() {
  let s = store().await;
  let text = "  .:-=+*#%@\n@%#*+=-:.  \n     @     ";
  let frame_lines: Vec<&str> = text.split('\n').collect();

  s.reset_frame_table(frame_lines.len() as u32).await.unwrap();
  let batch: Vec<LineUpdate> = frame_lines
    .iter()
    .enumerate()
    .map(|(i, l)| LineUpdate {
      line_number: i as u32,
      content:     (*l).to_string(),
    })
    .collect();
  s.apply_line_updates(12, &batch).await.unwrap();

  let lines = s.all_lines().await.unwrap();
  assert_eq!(join_lines(&lines), text);
}

#[tokio::test]
async fn single_line_lookup() {
  let s = store().await;
  s.reset_frame_table(3).await.unwrap();
  s.apply_line_updates(5, &updates(&[(1, "middle")])).await.unwrap();

  let line = s.line(1).await.unwrap().unwrap();
  assert_eq!(line.content, "middle");
  assert_eq!(line.frame_number, 5);

  assert!(s.line(99).await.unwrap().is_none());
}
