//! Detail / duplicate-selection state machine.
//!
//! Clicking a visible directory entry resolves the full duplicate group for
//! that name and feeds it to [`ModalFlow::open`]: one backing record opens
//! the detail view directly, several open the duplicate chooser first.
//!
//! The close behaviour is deliberately asymmetric: a detail view reached
//! *through* the chooser closes back to the chooser, while the chooser and
//! a directly-opened detail view close to `Browsing`.

use crate::{
  Error, Result,
  employee::EmployeeRecord,
};

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum ModalState {
  /// No modal; the list has focus.
  Browsing,
  /// Detail view opened directly from the list.
  ViewingSingle { record: EmployeeRecord },
  /// Duplicate chooser listing every record sharing one full name.
  ChoosingDuplicate { group: Vec<EmployeeRecord> },
  /// Detail view reached through the chooser; closing returns there.
  ViewingFromDuplicates {
    record: EmployeeRecord,
    group:  Vec<EmployeeRecord>,
  },
}

impl ModalState {
  fn name(&self) -> &'static str {
    match self {
      Self::Browsing => "browsing",
      Self::ViewingSingle { .. } => "viewing a record",
      Self::ChoosingDuplicate { .. } => "choosing a duplicate",
      Self::ViewingFromDuplicates { .. } => "viewing a duplicate",
    }
  }
}

// ─── Flow ────────────────────────────────────────────────────────────────────

/// Application-lifetime state machine for the directory's modal layer.
/// Initial state is `Browsing`; there is no terminal state. Reset it when
/// leaving the directory screen.
#[derive(Debug)]
pub struct ModalFlow {
  state: ModalState,
}

impl Default for ModalFlow {
  fn default() -> Self {
    Self::new()
  }
}

impl ModalFlow {
  pub fn new() -> Self {
    Self { state: ModalState::Browsing }
  }

  pub fn state(&self) -> &ModalState {
    &self.state
  }

  pub fn is_browsing(&self) -> bool {
    matches!(self.state, ModalState::Browsing)
  }

  /// React to a click on a visible entry. `group` is the full duplicate
  /// set for the entry's name (from
  /// [`Directory::duplicates_for`](crate::directory::Directory::duplicates_for)).
  ///
  /// Exactly one record goes straight to `ViewingSingle`; more than one
  /// goes to `ChoosingDuplicate`. An empty group is an error, as is
  /// opening while a modal is already up.
  pub fn open(&mut self, mut group: Vec<EmployeeRecord>) -> Result<()> {
    if !self.is_browsing() {
      return Err(Error::InvalidTransition {
        state: self.state.name(),
        event: "open a record",
      });
    }
    match group.len() {
      0 => Err(Error::EmptyGroup),
      1 => {
        self.state = ModalState::ViewingSingle {
          record: group.remove(0),
        };
        Ok(())
      }
      _ => {
        self.state = ModalState::ChoosingDuplicate { group };
        Ok(())
      }
    }
  }

  /// Select one record out of the duplicate chooser by id.
  pub fn choose(&mut self, id: i64) -> Result<()> {
    let ModalState::ChoosingDuplicate { group } = &self.state else {
      return Err(Error::InvalidTransition {
        state: self.state.name(),
        event: "choose a duplicate",
      });
    };

    let record = group
      .iter()
      .find(|r| r.id == id)
      .cloned()
      .ok_or(Error::NotInGroup(id))?;
    let group = group.clone();

    self.state = ModalState::ViewingFromDuplicates { record, group };
    Ok(())
  }

  /// Close the topmost modal. Never fails: closing while browsing is a
  /// no-op.
  pub fn close(&mut self) {
    let state = std::mem::replace(&mut self.state, ModalState::Browsing);
    self.state = match state {
      ModalState::Browsing => ModalState::Browsing,
      ModalState::ViewingSingle { .. } => ModalState::Browsing,
      ModalState::ChoosingDuplicate { .. } => ModalState::Browsing,
      // Back to the chooser, not to Browsing.
      ModalState::ViewingFromDuplicates { group, .. } => {
        ModalState::ChoosingDuplicate { group }
      }
    };
  }

  /// Drop whatever is open and return to `Browsing`. Used when leaving the
  /// directory screen entirely (logout, quit).
  pub fn reset(&mut self) {
    self.state = ModalState::Browsing;
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, TimeZone, Utc};

  use super::*;
  use crate::employee::DocumentType;

  fn record(id: i64, full_name: &str) -> EmployeeRecord {
    EmployeeRecord {
      id,
      document_type: DocumentType::Cc,
      document_number: format!("{id:0>6}"),
      document_issued_on: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
      born_on: NaiveDate::from_ymd_opt(1995, 5, 20).unwrap(),
      first_surname: "Ruiz".into(),
      second_surname: None,
      first_name: "Ana".into(),
      second_name: None,
      full_name: full_name.into(),
      age: 30,
      contract: None,
      onboarding: None,
      offboarding: None,
      social_security: None,
      project: None,
      created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
      updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
  }

  #[test]
  fn single_record_opens_detail_directly() {
    let mut flow = ModalFlow::new();
    flow.open(vec![record(1, "Ana Ruiz")]).unwrap();
    match flow.state() {
      ModalState::ViewingSingle { record } => assert_eq!(record.id, 1),
      other => panic!("expected ViewingSingle, got {other:?}"),
    }
  }

  #[test]
  fn multiple_records_open_the_chooser_with_exactly_those_records() {
    let mut flow = ModalFlow::new();
    flow
      .open(vec![record(1, "Ana Ruiz"), record(2, "Ana Ruiz")])
      .unwrap();
    match flow.state() {
      ModalState::ChoosingDuplicate { group } => {
        let ids: Vec<i64> = group.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
      }
      other => panic!("expected ChoosingDuplicate, got {other:?}"),
    }
  }

  #[test]
  fn empty_group_is_rejected() {
    let mut flow = ModalFlow::new();
    assert!(matches!(flow.open(vec![]), Err(Error::EmptyGroup)));
    assert!(flow.is_browsing());
  }

  #[test]
  fn single_detail_closes_to_browsing() {
    let mut flow = ModalFlow::new();
    flow.open(vec![record(1, "Ana Ruiz")]).unwrap();
    flow.close();
    assert!(flow.is_browsing());
  }

  #[test]
  fn detail_from_duplicates_closes_back_to_the_same_chooser() {
    let mut flow = ModalFlow::new();
    flow
      .open(vec![record(1, "Ana Ruiz"), record(2, "Ana Ruiz")])
      .unwrap();
    flow.choose(2).unwrap();

    match flow.state() {
      ModalState::ViewingFromDuplicates { record, .. } => {
        assert_eq!(record.id, 2);
      }
      other => panic!("expected ViewingFromDuplicates, got {other:?}"),
    }

    flow.close();
    match flow.state() {
      ModalState::ChoosingDuplicate { group } => {
        let ids: Vec<i64> = group.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
      }
      other => panic!("expected ChoosingDuplicate, got {other:?}"),
    }
  }

  #[test]
  fn chooser_closes_to_browsing() {
    let mut flow = ModalFlow::new();
    flow
      .open(vec![record(1, "Ana Ruiz"), record(2, "Ana Ruiz")])
      .unwrap();
    flow.close();
    assert!(flow.is_browsing());
  }

  #[test]
  fn choose_outside_the_chooser_is_rejected() {
    let mut flow = ModalFlow::new();
    assert!(matches!(
      flow.choose(1),
      Err(Error::InvalidTransition { .. })
    ));
  }

  #[test]
  fn choosing_an_id_outside_the_group_is_rejected() {
    let mut flow = ModalFlow::new();
    flow
      .open(vec![record(1, "Ana Ruiz"), record(2, "Ana Ruiz")])
      .unwrap();
    assert!(matches!(flow.choose(99), Err(Error::NotInGroup(99))));
    // Still in the chooser.
    assert!(matches!(
      flow.state(),
      ModalState::ChoosingDuplicate { .. }
    ));
  }

  #[test]
  fn close_while_browsing_is_a_noop() {
    let mut flow = ModalFlow::new();
    flow.close();
    assert!(flow.is_browsing());
  }
}
