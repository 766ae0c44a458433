//! Employee directory list — the main pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Render the deduplicated directory list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let visible = app.directory.visible();
  let total = app.directory.records().len();

  // Title with counts: visible entries vs raw records for the year.
  let title = if app.directory.query().trim().is_empty() {
    format!(" Empleados {} ({}) ", app.year, visible.len())
  } else {
    format!(
      " Empleados {} ({}/{}) — \"{}\" ",
      app.year,
      visible.len(),
      total,
      app.directory.query()
    )
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = visible
    .iter()
    .map(|record| {
      let position = record
        .contract
        .as_ref()
        .map(|c| c.position.as_str())
        .unwrap_or("—");

      let line = Line::from(vec![
        Span::styled(
          format!("{:<32}", record.full_name),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("{:<14}", record.document_number),
          Style::default().fg(Color::Gray),
        ),
        Span::styled(position.to_string(), Style::default().fg(Color::DarkGray)),
      ]);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items).block(block).highlight_style(
    Style::default()
      .bg(Color::Cyan)
      .fg(Color::Black)
      .add_modifier(Modifier::BOLD),
  );

  let mut state = ListState::default();
  if !visible.is_empty() {
    state.select(Some(app.list_cursor.min(visible.len() - 1)));
  }

  f.render_stateful_widget(list, area, &mut state);
}
