//! [`SqliteStore`] — the SQLite implementation of [`FrameStore`].

use std::path::Path;

use chrono::Utc;
use glyphcast_core::{
  frame::{FrameLine, LineUpdate, PLACEHOLDER_CONTENT, SENTINEL_FRAME},
  store::FrameStore,
  video::{NewVideo, VideoRecord},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawVideo, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A glyphcast store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

const VIDEO_COLUMNS: &str = "video_id, title, file_name, file_path, file_size, \
   media_type, content_hash, src_width, src_height, out_width, out_height, \
   src_fps, out_fps, frame_count, duration_secs, uploaded_at";

fn video_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawVideo> {
  Ok(RawVideo {
    video_id:      row.get(0)?,
    title:         row.get(1)?,
    file_name:     row.get(2)?,
    file_path:     row.get(3)?,
    file_size:     row.get(4)?,
    media_type:    row.get(5)?,
    content_hash:  row.get(6)?,
    src_width:     row.get(7)?,
    src_height:    row.get(8)?,
    out_width:     row.get(9)?,
    out_height:    row.get(10)?,
    src_fps:       row.get(11)?,
    out_fps:       row.get(12)?,
    frame_count:   row.get(13)?,
    duration_secs: row.get(14)?,
    uploaded_at:   row.get(15)?,
  })
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── FrameStore impl ─────────────────────────────────────────────────────────

impl FrameStore for SqliteStore {
  type Error = Error;

  // ── Videos ────────────────────────────────────────────────────────────────

  async fn save_video(&self, input: NewVideo) -> Result<VideoRecord> {
    let record = input.into_record(Uuid::new_v4(), Utc::now());

    let id_str = encode_uuid(record.video_id);
    let at_str = encode_dt(record.uploaded_at);
    let row    = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO videos (
             video_id, title, file_name, file_path, file_size,
             media_type, content_hash, src_width, src_height,
             out_width, out_height, src_fps, out_fps,
             frame_count, duration_secs, uploaded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
          rusqlite::params![
            id_str,
            row.title,
            row.file_name,
            row.file_path,
            row.file_size as i64,
            row.media_type,
            row.content_hash,
            row.src_width as i64,
            row.src_height as i64,
            row.out_width as i64,
            row.out_height as i64,
            row.src_fps,
            row.out_fps,
            row.frame_count.map(|n| n as i64),
            row.duration_secs,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawVideo> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE video_id = ?1"),
            rusqlite::params![id_str],
            video_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawVideo::into_record).transpose()
  }

  async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
    let raws: Vec<RawVideo> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VIDEO_COLUMNS} FROM videos ORDER BY uploaded_at DESC"
        ))?;
        let rows = stmt
          .query_map([], video_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVideo::into_record).collect()
  }

  // ── Frame grid ────────────────────────────────────────────────────────────

  async fn reset_frame_table(&self, line_count: u32) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM frame_lines", [])?;

        let mut stmt = conn.prepare(
          "INSERT INTO frame_lines (line_number, frame_number, content)
           VALUES (?1, ?2, ?3)",
        )?;
        for line_number in 0..line_count {
          stmt.execute(rusqlite::params![
            line_number as i64,
            SENTINEL_FRAME,
            PLACEHOLDER_CONTENT,
          ])?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn apply_line_updates(
    &self,
    frame_number: i64,
    updates: &[LineUpdate],
  ) -> Result<usize> {
    let updates = updates.to_vec();

    let updated = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "UPDATE frame_lines SET frame_number = ?1, content = ?2
           WHERE line_number = ?3",
        )?;

        let mut updated = 0;
        for u in &updates {
          // A zero row count here is an update for a line the grid does not
          // have; those are skipped, not errors.
          updated += stmt.execute(rusqlite::params![
            frame_number,
            u.content,
            u.line_number as i64,
          ])?;
        }
        Ok(updated)
      })
      .await?;

    Ok(updated)
  }

  async fn all_lines(&self) -> Result<Vec<FrameLine>> {
    let lines = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT line_number, frame_number, content FROM frame_lines
           ORDER BY line_number ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(FrameLine {
              line_number:  row.get::<_, i64>(0)? as u32,
              frame_number: row.get(1)?,
              content:      row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(lines)
  }

  async fn line(&self, line_number: u32) -> Result<Option<FrameLine>> {
    let line = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT line_number, frame_number, content FROM frame_lines
             WHERE line_number = ?1",
            rusqlite::params![line_number as i64],
            |row| {
              Ok(FrameLine {
                line_number:  row.get::<_, i64>(0)? as u32,
                frame_number: row.get(1)?,
                content:      row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(line)
  }
}
