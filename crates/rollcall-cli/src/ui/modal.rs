//! Delete-confirmation modal, drawn over the whole screen.

use ratatui::{
  Frame,
  layout::{Alignment, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};
use uuid::Uuid;

use crate::app::App;

const WIDTH: u16 = 50;
const HEIGHT: u16 = 6;

pub fn draw<B>(f: &mut Frame, screen: Rect, app: &App<B>, id: Uuid) {
  let area = centered(screen, WIDTH, HEIGHT);

  let name = app
    .materias
    .iter()
    .find(|m| m.id == id)
    .map(|m| m.materia.as_str())
    .unwrap_or("this subject");

  let block = Block::default()
    .title(" Delete ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let text = vec![
    Line::from(format!("Delete {name}?")),
    Line::from(""),
    Line::from(vec![
      Span::styled("[y]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
      Span::raw(" Yes    "),
      Span::styled("[n]", Style::default().add_modifier(Modifier::BOLD)),
      Span::raw(" No"),
    ]),
  ];

  f.render_widget(Clear, area);
  f.render_widget(
    Paragraph::new(text).block(block).alignment(Alignment::Center),
    area,
  );
}

/// A `width` × `height` rectangle centred in `outer`, clipped to fit.
fn centered(outer: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(outer.width);
  let height = height.min(outer.height);
  Rect {
    x: outer.x + (outer.width - width) / 2,
    y: outer.y + (outer.height - height) / 2,
    width,
    height,
  }
}
