//! Error types for `plantel-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("duplicate group is empty")]
  EmptyGroup,

  #[error("record {0} is not part of the duplicate group")]
  NotInGroup(i64),

  #[error("cannot {event} while {state}")]
  InvalidTransition {
    state: &'static str,
    event: &'static str,
  },

  #[error("not a monetary amount: {0:?}")]
  InvalidAmount(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
