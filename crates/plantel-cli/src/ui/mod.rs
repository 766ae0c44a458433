//! TUI rendering — orchestrates the screens and the modal layer.

pub mod duplicate_chooser;
pub mod employee_detail;
pub mod employee_list;
pub mod login;

use chrono::Local;
use plantel_core::modal::ModalState;
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
  match app.screen {
    Screen::Login => login::draw(f, app),
    Screen::Directory => draw_directory(f, app),
  }
}

fn draw_directory(f: &mut Frame, app: &App) {
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

  draw_header(f, rows[0], app);
  employee_list::draw(f, rows[1], app);
  draw_status(f, rows[2], app);

  // Modal layer on top of the list.
  match app.modal.state() {
    ModalState::Browsing => {}
    ModalState::ViewingSingle { record }
    | ModalState::ViewingFromDuplicates { record, .. } => {
      employee_detail::draw(f, record, app);
    }
    ModalState::ChoosingDuplicate { group } => {
      duplicate_chooser::draw(f, group, app);
    }
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let user = app
    .store
    .user()
    .map(|u| u.username.as_str())
    .unwrap_or("—");

  let left = Span::styled(
    " plantel  [/] buscar  [y] año  [e] exportar  [L] salir",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{user}  {date} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.exporting {
    ("DESCARGA", "Generando exportación…")
  } else if app.loading {
    ("CARGA", "Consultando el servidor…")
  } else if app.search_active {
    ("BUSCAR", "Escribe para filtrar  Esc cancelar  Enter aceptar")
  } else {
    match app.modal.state() {
      ModalState::Browsing => (
        "NORMAL",
        "↑↓/jk navegar  Enter detalle  / buscar  y año  e exportar  q salir",
      ),
      ModalState::ChoosingDuplicate { .. } => {
        ("REGISTROS", "↑↓/jk navegar  Enter ver  Esc cerrar")
      }
      ModalState::ViewingSingle { .. } => ("DETALLE", "↑↓/jk desplazar  Esc cerrar"),
      ModalState::ViewingFromDuplicates { .. } => {
        ("DETALLE", "↑↓/jk desplazar  Esc volver a registros")
      }
    }
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
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// A rect centered in `area`, `percent_x` × `percent_y` of its size.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
  let vertical = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
