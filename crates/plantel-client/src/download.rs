//! Saving the Excel export to disk.
//!
//! The filename embeds the trigger-time timestamp with the date separators
//! stripped: `RELACION_PERSONAL_EXPORT_20250115_143005.xlsx`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::Result;

/// Filename for an export triggered at `at`.
pub fn export_file_name(at: DateTime<Local>) -> String {
  format!(
    "RELACION_PERSONAL_EXPORT_{}.xlsx",
    at.format("%Y%m%d_%H%M%S")
  )
}

/// Write the downloaded workbook bytes into `dir` and return the full
/// path. Nothing is written when the download itself failed — callers only
/// reach this with a complete body in hand.
pub fn save_export(bytes: &[u8], dir: &Path, at: DateTime<Local>) -> Result<PathBuf> {
  let path = dir.join(export_file_name(at));
  std::fs::write(&path, bytes)?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn file_name_strips_date_separators() {
    let at = Local.with_ymd_and_hms(2025, 1, 15, 14, 30, 5).unwrap();
    assert_eq!(
      export_file_name(at),
      "RELACION_PERSONAL_EXPORT_20250115_143005.xlsx"
    );
  }
}
