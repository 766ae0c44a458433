//! HTTP client and session persistence for the Plantel roster backend.
//!
//! [`ApiClient`] wraps the backend's JSON REST API; [`SessionStore`] owns
//! the authenticated user and bearer token and persists them across runs.
//! The client only ever *borrows* the session — all authenticated calls
//! take `&Session`, so there is no ambient singleton holding credentials.

pub mod client;
pub mod download;
pub mod error;
pub mod session;

#[cfg(test)]
mod tests;

pub use client::{ApiClient, ApiConfig, Credentials, LoginResponse};
pub use error::{Error, Result};
pub use session::{Session, SessionStore, User};
