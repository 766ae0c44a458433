//! Duplicate chooser modal — one person, several contract records.

use plantel_core::{employee::EmployeeRecord, format};
use ratatui::{
  Frame,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use crate::app::App;

/// Render the chooser listing every record in `group`.
pub fn draw(f: &mut Frame, group: &[EmployeeRecord], app: &App) {
  let area = super::centered_rect(60, 50, f.area());

  let name = group
    .first()
    .map(|r| r.full_name.as_str())
    .unwrap_or("—");
  let block = Block::default()
    .title(format!(" {name} — {} registros ", group.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  let items: Vec<ListItem> = group
    .iter()
    .map(|record| {
      let position = record
        .contract
        .as_ref()
        .map(|c| c.position.as_str())
        .unwrap_or("sin contratación");

      let line = Line::from(vec![
        Span::styled(
          format!("Registro {:<6}", record.id),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("{position:<28}"),
          Style::default().fg(Color::Gray),
        ),
        Span::styled(
          format!("creado {}", format::date(record.created_at.date_naive())),
          Style::default().fg(Color::DarkGray),
        ),
      ]);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items).block(block).highlight_style(
    Style::default()
      .bg(Color::Yellow)
      .fg(Color::Black)
      .add_modifier(Modifier::BOLD),
  );

  let mut state = ListState::default();
  if !group.is_empty() {
    state.select(Some(app.chooser_cursor.min(group.len() - 1)));
  }

  f.render_widget(Clear, area);
  f.render_stateful_widget(list, area, &mut state);
}
