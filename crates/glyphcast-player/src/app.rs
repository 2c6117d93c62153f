//! Application state machine and event dispatcher.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use glyphcast_core::{frame::join_lines, video::VideoRecord};

use crate::{
  client::{ApiClient, ProgressInfo},
  playback::Playback,
};

/// Client-side polling cadence for extraction progress.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Give up waiting and assume completion after this long.
const PROCESSING_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Cadence of the rendering query while watching.
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Only every Nth frame is fetched and pushed; the in-between frames are
/// skipped to halve the write rate.
const SYNC_STRIDE: u64 = 2;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Pick a stored video to process and watch.
  VideoList,
  /// Waiting for the extraction script, polling progress.
  Processing,
  /// Playback-driven frame sync and rendering.
  Watch,
}

// ─── Per-screen state ─────────────────────────────────────────────────────────

pub struct ProcessingState {
  pub video:    VideoRecord,
  pub basename: String,
  pub progress: Option<ProgressInfo>,
  /// Human-readable description of the current step.
  pub step:     String,
  started:      Instant,
  last_poll:    Option<Instant>,
}

#[derive(Debug, Default)]
pub struct SyncStats {
  pub frames_synced:  u64,
  pub frames_skipped: u64,
  pub lines_written:  u64,
  pub render_queries: u64,
}

pub struct WatchState {
  pub video:      VideoRecord,
  pub playback:   Playback,
  /// The joined grid text from the latest rendering query.
  pub grid:       String,
  pub line_count: usize,
  pub stats:      SyncStats,
  last_render:    Option<Instant>,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// All videos returned by the API, newest first.
  pub videos: Vec<VideoRecord>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* video list.
  pub list_cursor: usize,

  pub processing: Option<ProcessingState>,
  pub watch:      Option<WatchState>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with an empty video list.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::VideoList,
      videos: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      processing: None,
      watch: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch all videos from the API and populate `self.videos`.
  pub async fn load_videos(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading videos…".into();
    match self.client.list_videos().await {
      Ok(videos) => {
        self.videos = videos;
        self.list_cursor = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Returns videos that match the current filter query.
  pub fn filtered_videos(&self) -> Vec<&VideoRecord> {
    if self.filter.is_empty() {
      return self.videos.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .videos
      .iter()
      .filter(|v| {
        matcher.fuzzy_match(&v.title, &self.filter).is_some()
          || matcher.fuzzy_match(&v.file_name, &self.filter).is_some()
      })
      .collect()
  }

  /// The video under the list cursor in the filtered view, if any.
  pub fn cursor_video(&self) -> Option<&VideoRecord> {
    let list = self.filtered_videos();
    list.get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      return Ok(self.handle_filter_key(key));
    }

    match self.screen {
      Screen::VideoList => self.handle_list_key(key).await,
      Screen::Processing => Ok(self.handle_processing_key(key)),
      Screen::Watch => Ok(self.handle_watch_key(key)),
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    true
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_videos().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
        }
      }

      // Process and watch the selected video.
      KeyCode::Enter => {
        if let Some(video) = self.cursor_video().cloned() {
          self.start_processing(video).await;
        }
      }

      // Reload the list.
      KeyCode::Char('r') => {
        let _ = self.load_videos().await;
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_processing_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      // Back out of waiting. The extraction script keeps running — there is
      // no cancellation channel to it.
      KeyCode::Esc => {
        self.processing = None;
        self.screen = Screen::VideoList;
      }
      _ => {}
    }
    true
  }

  fn handle_watch_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char(' ') => {
        if let Some(watch) = self.watch.as_mut() {
          watch.playback.toggle(Instant::now());
        }
      }
      KeyCode::Char('r') => {
        if let Some(watch) = self.watch.as_mut() {
          watch.playback.restart(Instant::now());
        }
      }
      KeyCode::Esc => {
        self.watch = None;
        self.screen = Screen::VideoList;
      }
      _ => {}
    }
    true
  }

  // ── Processing ────────────────────────────────────────────────────────────

  /// Kick off extraction for `video` and move to the processing screen.
  async fn start_processing(&mut self, video: VideoRecord) {
    match self.client.process_video(&video.file_path).await {
      Ok(basename) => {
        self.processing = Some(ProcessingState {
          video,
          basename,
          progress: None,
          step: "Initializing…".into(),
          started: Instant::now(),
          last_poll: None,
        });
        self.screen = Screen::Processing;
        self.status_msg = String::new();
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
      }
    }
  }

  /// Drive the active screen. Called on every loop iteration.
  pub async fn on_tick(&mut self) -> anyhow::Result<()> {
    match self.screen {
      Screen::Processing => self.tick_processing().await,
      Screen::Watch => self.tick_watch().await,
      Screen::VideoList => {}
    }
    Ok(())
  }

  async fn tick_processing(&mut self) {
    let now = Instant::now();
    let client = self.client.clone();

    let Some(processing) = self.processing.as_mut() else {
      return;
    };

    // Hard timeout: assume completion rather than waiting forever on a
    // stalled script.
    if now.duration_since(processing.started) >= PROCESSING_TIMEOUT {
      tracing::warn!(
        basename = %processing.basename,
        "processing timeout reached, assuming completion"
      );
      processing.step = "Complete!".into();
      let video = processing.video.clone();
      self.enter_watch(video).await;
      return;
    }

    let due = processing
      .last_poll
      .is_none_or(|at| now.duration_since(at) >= POLL_INTERVAL);
    if !due {
      return;
    }
    processing.last_poll = Some(now);

    match client.progress(&processing.basename).await {
      Ok(progress) => {
        processing.progress = Some(progress);
        if progress.is_complete || progress.percent >= 100 {
          processing.step = "Complete!".into();
          let video = processing.video.clone();
          self.enter_watch(video).await;
        } else if progress.original_count == 0 {
          processing.step = "Extracting frames…".into();
        } else {
          processing.step = format!(
            "Converting to ASCII… ({}/{})",
            progress.ascii_count, progress.original_count
          );
        }
      }
      // Swallow and keep polling; the timeout is the backstop.
      Err(e) => {
        tracing::warn!(error = %e, "progress poll failed");
        processing.step = format!("Error: {e}");
      }
    }
  }

  // ── Watching ──────────────────────────────────────────────────────────────

  /// Size the grid from the first available frame, reset the table, and
  /// move to the watch screen.
  async fn enter_watch(&mut self, video: VideoRecord) {
    let client = self.client.clone();

    let mut line_count = 0;
    for probe in [0u32, 1] {
      match client.get_file(probe).await {
        Ok(Some(frame)) => {
          line_count = frame.line_count;
          break;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(frame = probe, error = %e, "sizing probe failed"),
      }
    }

    if let Err(e) = client.reset_frames(line_count).await {
      // Proceed regardless; the grid will simply be whatever it was.
      tracing::warn!(error = %e, "frame table reset failed");
      self.status_msg = format!("Error: {e}");
    }

    let fps = video.out_fps;
    let duration = video.duration_secs;
    self.watch = Some(WatchState {
      video,
      playback: Playback::new(fps, duration),
      grid: String::new(),
      line_count,
      stats: SyncStats::default(),
      last_render: None,
    });
    self.processing = None;
    self.screen = Screen::Watch;
  }

  async fn tick_watch(&mut self) {
    let now = Instant::now();
    let client = self.client.clone();

    let Some(watch) = self.watch.as_mut() else {
      return;
    };

    // Playback clock → frame index → sync step for even frames.
    if let Some(frame) = watch.playback.tick(now)
      && frame % SYNC_STRIDE == 0
    {
      sync_frame(&client, frame, &mut watch.stats).await;
    }

    // Rendering query: the full grid, joined with newlines.
    let render_due = watch
      .last_render
      .is_none_or(|at| now.duration_since(at) >= RENDER_INTERVAL);
    if render_due {
      watch.last_render = Some(now);
      match client.all_frames().await {
        Ok(lines) => {
          watch.grid = join_lines(&lines);
          watch.stats.render_queries += 1;
        }
        Err(e) => tracing::warn!(error = %e, "rendering query failed"),
      }
    }
  }
}

/// Fetch one frame's text and push its lines into the store.
///
/// A missing frame file (404) is an accepted gap: skipped, never retried.
/// Any other failure is logged and likewise skipped — errors never
/// interrupt playback.
async fn sync_frame(client: &ApiClient, frame: u64, stats: &mut SyncStats) {
  let frame = u32::try_from(frame).unwrap_or(u32::MAX);

  match client.get_file(frame).await {
    Ok(Some(file)) => match client.push_lines(file.frame_number, &file.lines).await {
      Ok(updated) => {
        tracing::debug!(file = %file.file_name, updated, "synced frame");
        stats.frames_synced += 1;
        stats.lines_written += updated as u64;
      }
      Err(e) => {
        tracing::warn!(frame, error = %e, "line push failed");
        stats.frames_skipped += 1;
      }
    },
    Ok(None) => stats.frames_skipped += 1,
    Err(e) => {
      tracing::warn!(frame, error = %e, "frame fetch failed");
      stats.frames_skipped += 1;
    }
  }
}
