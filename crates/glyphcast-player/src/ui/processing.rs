//! Processing screen — extraction progress while the script runs.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Render the processing screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(processing) = app.processing.as_ref() else {
    return;
  };

  let block = Block::default()
    .title(format!(" Processing {} ", processing.video.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2),
      Constraint::Length(1), // progress bar
      Constraint::Length(2),
      Constraint::Min(0),
    ])
    .split(inner);

  f.render_widget(
    Paragraph::new(vec![
      Line::from("Converting your video to ASCII art."),
      Line::from(Span::styled(
        "This may take a few minutes depending on video length.",
        Style::default().fg(Color::DarkGray),
      )),
    ]),
    rows[0],
  );

  let percent = processing.progress.map(|p| p.percent).unwrap_or(0);
  draw_bar(f, rows[1], percent);

  let counts = processing
    .progress
    .map(|p| format!("{} / {} frames", p.ascii_count, p.original_count))
    .unwrap_or_else(|| "waiting for first frames…".to_string());

  f.render_widget(
    Paragraph::new(vec![
      Line::from(processing.step.clone()),
      Line::from(Span::styled(counts, Style::default().fg(Color::DarkGray))),
    ]),
    rows[2],
  );
}

/// A plain text progress bar: `[####----] 42%`.
fn draw_bar(f: &mut Frame, area: Rect, percent: u8) {
  let width = area.width.saturating_sub(8).max(10) as usize;
  let filled = width * percent as usize / 100;

  let bar = format!(
    "[{}{}] {percent:>3}%",
    "#".repeat(filled),
    "-".repeat(width - filled),
  );
  f.render_widget(
    Paragraph::new(bar).style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    area,
  );
}
