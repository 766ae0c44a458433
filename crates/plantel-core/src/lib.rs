//! Core types and pure logic for the Plantel employee roster.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! It holds the employee data model, the directory reconciler (search +
//! per-name deduplication), and the modal-flow state machine the terminal
//! client drives.

pub mod directory;
pub mod employee;
pub mod error;
pub mod format;
pub mod modal;

pub use error::{Error, Result};
