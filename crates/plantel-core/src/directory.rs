//! Directory reconciler — search filter plus per-name deduplication.
//!
//! The backend returns every contract record for the selected year, so one
//! person with several contracts appears several times. The reconciler
//! shows exactly one entry per distinct full name (the first record in
//! original order) and keeps every skipped record reachable through
//! [`Directory::duplicates_for`], independent of the active search query.

use crate::employee::EmployeeRecord;

/// The current year's record set plus the active free-text query.
///
/// Both views ([`visible`](Self::visible) and
/// [`duplicates_for`](Self::duplicates_for)) are pure functions of the
/// stored state; calling them repeatedly yields identical results.
#[derive(Debug, Default)]
pub struct Directory {
  records: Vec<EmployeeRecord>,
  query:   String,
}

impl Directory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the record set (e.g. after a year change). Resets nothing
  /// else; the query survives a reload.
  pub fn set_records(&mut self, records: Vec<EmployeeRecord>) {
    self.records = records;
  }

  pub fn set_query(&mut self, query: impl Into<String>) {
    self.query = query.into();
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  /// The full, unfiltered record set in original order.
  pub fn records(&self) -> &[EmployeeRecord] {
    &self.records
  }

  /// Filtered, deduplicated list: at most one record per distinct full
  /// name, always the first record in original order bearing that name.
  ///
  /// Matching is a lowercase substring test on the full name OR a literal
  /// substring test on the document number. No accent normalization is
  /// performed: names differing only by accent are distinct.
  pub fn visible(&self) -> Vec<&EmployeeRecord> {
    let query = self.query.trim();
    let needle = query.to_lowercase();

    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();

    for record in &self.records {
      if !query.is_empty()
        && !record.full_name.to_lowercase().contains(&needle)
        && !record.document_number.contains(query)
      {
        continue;
      }
      if seen.contains(&record.full_name.as_str()) {
        continue;
      }
      seen.push(&record.full_name);
      out.push(record);
    }

    out
  }

  /// Every record in the *full unfiltered* set sharing `full_name`, in
  /// original order. Used by the duplicate-resolution flow; the current
  /// query has no effect here, so no record is ever unreachable.
  pub fn duplicates_for(&self, full_name: &str) -> Vec<&EmployeeRecord> {
    self
      .records
      .iter()
      .filter(|r| r.full_name == full_name)
      .collect()
  }
}
