//! SQL schema for the glyphcast SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Video records are write-once.
-- No UPDATE is ever issued against this table.
CREATE TABLE IF NOT EXISTS videos (
    video_id      TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    file_name     TEXT NOT NULL,
    file_path     TEXT NOT NULL,
    file_size     INTEGER NOT NULL,
    media_type    TEXT NOT NULL,
    content_hash  TEXT NOT NULL,   -- SHA-256 hex of the uploaded bytes
    src_width     INTEGER NOT NULL,
    src_height    INTEGER NOT NULL,
    out_width     INTEGER NOT NULL,
    out_height    INTEGER NOT NULL,
    src_fps       REAL NOT NULL,
    out_fps       REAL NOT NULL,
    frame_count   INTEGER,
    duration_secs REAL,
    uploaded_at   TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- The ASCII grid: exactly one frame's worth of rows, patched in place.
-- line_number uniqueness is maintained by the patch-by-line-number write
-- path, not by a constraint.
CREATE TABLE IF NOT EXISTS frame_lines (
    line_number  INTEGER NOT NULL,
    frame_number INTEGER NOT NULL,  -- -1 until the first real frame lands
    content      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS videos_uploaded_idx   ON videos(uploaded_at);
CREATE INDEX IF NOT EXISTS frame_lines_line_idx  ON frame_lines(line_number);

PRAGMA user_version = 1;
";
