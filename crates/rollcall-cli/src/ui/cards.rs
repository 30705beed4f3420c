//! Cards pane — right panel, one card per stored subject.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rollcall_core::materia::Materia;

use crate::app::App;

/// Render the card list into `area`.
pub fn draw<B>(f: &mut Frame, area: Rect, app: &App<B>) {
  let block = Block::default()
    .title(format!(" Subjects ({}) ", app.materias.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.materias.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No subjects yet. Fill in the form and press Enter.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .materias
    .iter()
    .map(|m| card(m, app.edit_id == Some(m.id)))
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.card_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
      .highlight_symbol("▌"),
    area,
    &mut state,
  );
}

fn card(m: &Materia, editing: bool) -> ListItem<'static> {
  let label = Style::default().fg(Color::Gray);
  let value = Style::default().add_modifier(Modifier::BOLD);

  let row = |name: &'static str, v: String| {
    Line::from(vec![Span::styled(format!("{name:<10}"), label), Span::styled(v, value)])
  };

  let mut lines = vec![
    row("Subject", m.materia.clone()),
    row("Professor", m.professor.clone()),
    row("Term", m.semestre.to_string()),
    row("Absences", m.faltas.to_string()),
  ];
  if editing {
    lines.push(Line::from(Span::styled(
      "(editing)",
      Style::default().fg(Color::Yellow),
    )));
  }
  lines.push(Line::from(""));

  ListItem::new(lines)
}
