//! es-CO display formatting for monetary amounts and dates.
//!
//! The backend serialises money as decimal strings and dates as ISO 8601;
//! these helpers render them for display (Colombian peso grouping,
//! long-form Spanish dates).

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::{Error, Result};

const MONTHS: [&str; 12] = [
  "enero",
  "febrero",
  "marzo",
  "abril",
  "mayo",
  "junio",
  "julio",
  "agosto",
  "septiembre",
  "octubre",
  "noviembre",
  "diciembre",
];

/// Format a decimal-string amount as Colombian pesos: `$ 1.234.567`.
/// Fractions are rounded away (COP amounts are displayed without cents).
pub fn cop(amount: &str) -> Result<String> {
  let value: f64 = amount
    .trim()
    .parse()
    .map_err(|_| Error::InvalidAmount(amount.to_string()))?;
  let whole = value.round() as i64;

  let digits = whole.unsigned_abs().to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(ch);
  }

  let sign = if whole < 0 { "-" } else { "" };
  Ok(format!("{sign}$ {grouped}"))
}

/// `15 de enero de 2025`.
pub fn date(d: NaiveDate) -> String {
  format!(
    "{} de {} de {}",
    d.day(),
    MONTHS[d.month0() as usize],
    d.year()
  )
}

/// `15 de enero de 2025, 14:05`.
pub fn datetime(dt: DateTime<Utc>) -> String {
  format!(
    "{}, {:02}:{:02}",
    date(dt.date_naive()),
    dt.hour(),
    dt.minute()
  )
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn cop_groups_thousands_with_dots() {
    assert_eq!(cop("1234567").unwrap(), "$ 1.234.567");
    assert_eq!(cop("1423500.00").unwrap(), "$ 1.423.500");
    assert_eq!(cop("900").unwrap(), "$ 900");
    assert_eq!(cop("0").unwrap(), "$ 0");
  }

  #[test]
  fn cop_rejects_garbage() {
    assert!(matches!(cop("n/a"), Err(Error::InvalidAmount(_))));
  }

  #[test]
  fn dates_render_in_spanish() {
    let d = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    assert_eq!(date(d), "15 de enero de 2025");

    let dt = Utc.with_ymd_and_hms(2025, 10, 3, 14, 5, 0).unwrap();
    assert_eq!(datetime(dt), "3 de octubre de 2025, 14:05");
  }
}
