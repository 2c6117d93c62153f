//! Watch screen — the ASCII grid plus playback and throughput panels.

use std::time::Instant;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{
  app::{App, WatchState},
  playback::Phase,
  ui::format_time,
};

/// Render the watch screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(watch) = app.watch.as_ref() else {
    return;
  };

  // ASCII output on the left, playback + stats on the right.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
    .split(area);

  draw_grid(f, cols[0], watch);

  let right = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(9), Constraint::Min(0)])
    .split(cols[1]);

  draw_playback(f, right[0], watch);
  draw_stats(f, right[1], watch);
}

// ─── ASCII output ─────────────────────────────────────────────────────────────

fn draw_grid(f: &mut Frame, area: Rect, watch: &WatchState) {
  let block = Block::default()
    .title(" ASCII Output ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // Every frame shown here was written to, then queried from, the store.
  f.render_widget(
    Paragraph::new(watch.grid.as_str()).style(Style::default().fg(Color::Green)),
    inner,
  );
}

// ─── Playback panel ───────────────────────────────────────────────────────────

fn draw_playback(f: &mut Frame, area: Rect, watch: &WatchState) {
  let block = Block::default()
    .title(" Playback ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let phase = match watch.playback.phase() {
    Phase::Idle => "idle — press Space",
    Phase::Playing => "playing",
    Phase::Paused => "paused",
    Phase::Ended => "ended — Space replays",
  };

  let elapsed = format_time(watch.playback.elapsed(Instant::now()).as_secs_f64());
  let total = watch
    .video
    .duration_secs
    .map(format_time)
    .unwrap_or_else(|| "?:??".to_string());

  let lines = vec![
    Line::from(Span::styled(
      watch.video.title.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(format!("{elapsed} / {total}")),
    Line::from(phase),
    Line::from(format!("frame {}", watch.playback.current_frame())),
    Line::from(Span::styled(
      format!("{:.0} fps · {} grid lines", watch.playback.fps(), watch.line_count),
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}

// ─── Stats panel ──────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, watch: &WatchState) {
  let block = Block::default()
    .title(" Stats for Nerds ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let stats = &watch.stats;
  let row = |label: &str, value: u64, color: Color| {
    Line::from(vec![
      Span::raw(format!("{label:<18}")),
      Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ),
    ])
  };

  let lines = vec![
    row("Frames synced:", stats.frames_synced, Color::Blue),
    row("Frames skipped:", stats.frames_skipped, Color::DarkGray),
    row("Line writes:", stats.lines_written, Color::Green),
    row("Render queries:", stats.render_queries, Color::Magenta),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}
