//! Employee detail modal — every sub-record rendered explicitly, including
//! an explicit line when one is absent.

use chrono::NaiveDate;
use plantel_core::{employee::EmployeeRecord, format};
use ratatui::{
  Frame,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;

/// Render the detail modal for `record` over the list.
pub fn draw(f: &mut Frame, record: &EmployeeRecord, app: &App) {
  let area = super::centered_rect(70, 80, f.area());

  let block = Block::default()
    .title(format!(" {} ", record.full_name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);

  f.render_widget(Clear, area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  // ── Identification ────────────────────────────────────────────────────
  lines.push(section("Identificación"));
  lines.push(field(
    "Documento",
    format!(
      "{} {}",
      record.document_type.display_name(),
      record.document_number
    ),
  ));
  lines.push(field("Expedición", format::date(record.document_issued_on)));
  lines.push(field(
    "Nacimiento",
    format!("{} ({} años)", format::date(record.born_on), record.age),
  ));
  lines.push(Line::from(""));

  // ── Contract ──────────────────────────────────────────────────────────
  lines.push(section("Contratación"));
  match &record.contract {
    None => lines.push(absent("Sin contratación registrada")),
    Some(c) => {
      let contract_type = c
        .contract_type_display
        .clone()
        .unwrap_or_else(|| c.contract_type.display_name().to_string());
      lines.push(field("Tipo", contract_type));
      lines.push(field("Cargo", c.position.clone()));
      lines.push(field(
        "Salario",
        format::cop(&c.salary).unwrap_or_else(|_| c.salary.clone()),
      ));
      let municipality = c
        .base_municipality_display
        .clone()
        .unwrap_or_else(|| c.base_municipality.clone());
      lines.push(field("Municipio base", municipality));
      lines.push(field("Inicio", opt_date(c.start_date)));
      lines.push(field("Fin", opt_date(c.end_date)));
      if let Some(active) = c.active {
        let state = if active { "Vigente" } else { "Finalizado" };
        let days = c
          .days_remaining
          .map(|d| format!(" ({d} días restantes)"))
          .unwrap_or_default();
        lines.push(field("Estado", format!("{state}{days}")));
      }
    }
  }
  lines.push(Line::from(""));

  // ── Onboarding ────────────────────────────────────────────────────────
  lines.push(section("Ingreso"));
  match &record.onboarding {
    None => lines.push(absent("Sin ingreso registrado")),
    Some(o) => {
      lines.push(field("Fecha de ingreso", opt_date(o.entry_date)));
      lines.push(field("Examen de ingreso", opt_date(o.entry_exam_date)));
      lines.push(field("Entrega EPP", opt_date(o.ppe_delivery)));
      lines.push(field("Entrega dotación", opt_date(o.uniform_delivery)));
    }
  }
  lines.push(Line::from(""));

  // ── Offboarding ───────────────────────────────────────────────────────
  lines.push(section("Retiro"));
  match &record.offboarding {
    None => lines.push(absent("Sin retiro registrado")),
    Some(r) => {
      lines.push(field("Fecha de retiro", opt_date(r.exit_date)));
      lines.push(field("Liquidación", opt_date(r.settlement_date)));
      let amount = r
        .settlement_amount
        .as_deref()
        .map(|a| format::cop(a).unwrap_or_else(|_| a.to_string()))
        .unwrap_or_else(|| "—".to_string());
      lines.push(field("Valor liquidación", amount));
      lines.push(field("Examen de retiro", opt_date(r.exit_exam_date)));
    }
  }
  lines.push(Line::from(""));

  // ── Social security ───────────────────────────────────────────────────
  lines.push(section("Seguridad social"));
  match &record.social_security {
    None => lines.push(absent("Sin seguridad social registrada")),
    Some(s) => {
      lines.push(field(
        "EPS",
        affiliation(s.eps.as_deref(), s.eps_affiliation),
      ));
      lines.push(field(
        "Fondo de pensión",
        affiliation(s.pension_fund.as_deref(), s.pension_affiliation),
      ));
      lines.push(field(
        "Caja de compensación",
        affiliation(
          s.compensation_fund.as_deref(),
          s.compensation_fund_affiliation,
        ),
      ));
      let arl = s
        .risk_insurer_display
        .as_deref()
        .or(s.risk_insurer.as_deref());
      let risk = s
        .risk_class_display
        .as_deref()
        .or(s.risk_class.as_deref())
        .map(|r| format!(" · {r}"))
        .unwrap_or_default();
      lines.push(field(
        "ARL",
        format!(
          "{}{risk}",
          affiliation(arl, s.risk_insurer_affiliation)
        ),
      ));
    }
  }
  lines.push(Line::from(""));

  // ── Projects ──────────────────────────────────────────────────────────
  lines.push(section("Proyectos"));
  match &record.project {
    None => lines.push(absent("Sin asignación de proyectos")),
    Some(p) => {
      let categories: Vec<&str> = [
        (p.administrative, "Administrativo"),
        (p.facility_construction, "Construcción de instalaciones"),
        (p.network_construction, "Construcción de redes"),
        (p.services, "Servicios"),
        (p.network_maintenance, "Mantenimiento de redes"),
      ]
      .into_iter()
      .filter_map(|(on, label)| on.then_some(label))
      .collect();

      if categories.is_empty() {
        lines.push(absent("Ninguna categoría activa"));
      } else {
        for category in categories {
          lines.push(field("•", category.to_string()));
        }
      }
    }
  }
  lines.push(Line::from(""));

  // ── Audit trail ───────────────────────────────────────────────────────
  lines.push(Line::from(Span::styled(
    format!(
      "Creado: {}   Actualizado: {}",
      format::datetime(record.created_at),
      format::datetime(record.updated_at)
    ),
    Style::default().fg(Color::DarkGray),
  )));

  let paragraph = Paragraph::new(lines).scroll((app.detail_scroll as u16, 0));
  f.render_widget(paragraph, inner);
}

// ─── Line helpers ─────────────────────────────────────────────────────────────

fn section(title: &str) -> Line<'_> {
  Line::from(Span::styled(
    title,
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

fn field(label: &str, value: String) -> Line<'_> {
  Line::from(vec![
    Span::styled(format!("  {label:<22}"), Style::default().fg(Color::Gray)),
    Span::raw(value),
  ])
}

fn absent(text: &str) -> Line<'_> {
  Line::from(Span::styled(
    format!("  {text}"),
    Style::default().fg(Color::DarkGray),
  ))
}

fn opt_date(d: Option<NaiveDate>) -> String {
  d.map(format::date).unwrap_or_else(|| "—".to_string())
}

fn affiliation(name: Option<&str>, since: Option<NaiveDate>) -> String {
  match (name, since) {
    (Some(n), Some(d)) => format!("{n} (desde {})", format::date(d)),
    (Some(n), None) => n.to_string(),
    (None, _) => "—".to_string(),
  }
}
