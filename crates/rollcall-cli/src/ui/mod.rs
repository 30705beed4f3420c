//! TUI rendering — orchestrates all panes.

pub mod cards;
pub mod form;
pub mod modal;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<B>(f: &mut Frame, app: &App<B>) {
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
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(id) = app.pending_delete {
    modal::draw(f, area, app, id);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " rollcall  subjects & absences",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));
  let line = spread(area.width, left, right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

/// `left` and `right` pushed to opposite edges of a `width`-column line.
fn spread<'a>(width: u16, left: Span<'a>, right: Span<'a>) -> Line<'a> {
  let pad = width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);
  Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right])
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<B>(f: &mut Frame, area: Rect, app: &App<B>) {
  // Form on the left (40%), cards on the right (60%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  form::draw(f, cols[0], app);
  cards::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<B>(f: &mut Frame, area: Rect, app: &App<B>) {
  let (mode_label, hints) = if app.modal_visible() {
    ("DELETE", "y/Enter confirm  n/Esc cancel")
  } else if app.is_editing() {
    ("EDIT", "Tab next field  ←→ term  Enter update  Esc cancel edit  ^C quit")
  } else {
    (
      "NEW",
      "Tab next field  ←→ term  Enter register  ↑↓ cards  ^E edit  ^D delete  ^R reload  ^C quit",
    )
  };

  let (status, status_style) = if let Some(err) = &app.request_error {
    (err.clone(), Style::default().fg(Color::Red))
  } else if !app.status_msg.is_empty() {
    (app.status_msg.clone(), Style::default().fg(Color::Green))
  } else {
    (hints.to_string(), Style::default().fg(Color::Gray))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let line = Line::from(vec![mode_span, Span::styled(format!("  {status}"), status_style)]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
