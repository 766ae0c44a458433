//! Login screen — the only screen reachable while unauthenticated.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, LoginField};

pub fn draw(f: &mut Frame, app: &App) {
  let area = super::centered_rect(50, 40, f.area());

  let block = Block::default()
    .title(" Plantel — Iniciar sesión ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // prompt
      Constraint::Length(1),
      Constraint::Length(1), // username
      Constraint::Length(1), // password
      Constraint::Length(1),
      Constraint::Length(1), // error
      Constraint::Min(0),    // hints
    ])
    .split(inner);

  f.render_widget(
    Paragraph::new("Ingresa tus credenciales para acceder al sistema")
      .style(Style::default().fg(Color::Gray)),
    rows[0],
  );

  f.render_widget(
    field_line("Usuario", &app.login.username, app.login.focus == LoginField::Username),
    rows[2],
  );
  let masked = "•".repeat(app.login.password.chars().count());
  f.render_widget(
    field_line("Contraseña", &masked, app.login.focus == LoginField::Password),
    rows[3],
  );

  if let Some(error) = &app.login.error {
    f.render_widget(
      Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
      rows[5],
    );
  }

  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      "Tab cambiar campo  Enter ingresar  Esc salir",
      Style::default().fg(Color::DarkGray),
    ))),
    rows[6],
  );
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
  let cursor = if focused { "▏" } else { "" };
  let style = if focused {
    Style::default().add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  Paragraph::new(Line::from(vec![
    Span::styled(format!("{label:<12}"), style),
    Span::raw(format!("{value}{cursor}")),
  ]))
}
