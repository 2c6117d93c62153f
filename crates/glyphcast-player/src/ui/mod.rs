//! TUI rendering — orchestrates all screens.

pub mod processing;
pub mod video_list;
pub mod watch;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  match app.screen {
    Screen::VideoList => video_list::draw(f, rows[1], app),
    Screen::Processing => processing::draw(f, rows[1], app),
    Screen::Watch => watch::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let left = Span::styled(
    " glyphcast  stress test your store with videos",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(left)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::VideoList if app.filter_active => {
      ("SEARCH", "Type to filter  Esc cancel  Enter done")
    }
    Screen::VideoList => (
      "VIDEOS",
      "↑↓/jk navigate  / search  Enter process+watch  r reload  q quit",
    ),
    Screen::Processing => ("PROCESSING", "Esc back  q quit"),
    Screen::Watch => ("WATCH", "Space play/pause  r restart  Esc back  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// `M:SS` formatting for playback clocks.
pub(crate) fn format_time(seconds: f64) -> String {
  let total = seconds.max(0.0) as u64;
  format!("{}:{:02}", total / 60, total % 60)
}
