//! Form pane — left panel: four inputs, the validation message and the
//! submit button.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rollcall_core::form::{FormField, TERM_CHOICES};
use strum::IntoEnumIterator as _;

use crate::app::App;

/// Render the form into `area`.
pub fn draw<B>(f: &mut Frame, area: Rect, app: &App<B>) {
  let title = if app.is_editing() {
    " Edit subject "
  } else {
    " Register subject "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3), // subject
      Constraint::Length(3), // professor
      Constraint::Length(3), // term
      Constraint::Length(3), // absences
      Constraint::Length(2), // error message
      Constraint::Length(1), // submit
      Constraint::Min(0),
    ])
    .split(inner);

  for (i, field) in FormField::iter().enumerate() {
    draw_input(f, rows[i], app, field);
  }

  if let Some(msg) = &app.error_message {
    f.render_widget(
      Paragraph::new(msg.as_str())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true }),
      rows[4],
    );
  }

  let label = if app.is_editing() { "[ Update ]" } else { "[ Register ]" };
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      label,
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ))),
    rows[5],
  );
}

fn draw_input<B>(f: &mut Frame, area: Rect, app: &App<B>, field: FormField) {
  let focused = app.focus == field;
  let value = app.form.get(field);

  let title = if field == FormField::Semestre {
    format!(
      " {field} ←→ {}–{} ",
      TERM_CHOICES.start(),
      TERM_CHOICES.end()
    )
  } else {
    format!(" {field} ")
  };

  let border = if focused {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border);

  let line = if value.is_empty() && !focused {
    Line::from(Span::styled(
      field.placeholder(),
      Style::default().fg(Color::DarkGray),
    ))
  } else if focused {
    Line::from(vec![Span::raw(value), Span::styled("_", border)])
  } else {
    Line::from(value)
  };

  f.render_widget(Paragraph::new(line).block(block), area);
}
