//! Session store — the authenticated user and bearer token, persisted as a
//! single named record (`auth-storage.json`) that survives restarts.
//!
//! Contract: [`SessionStore::open`] rehydrates the record *before* any
//! authenticated view is allowed to render; a missing record simply yields
//! an unauthenticated session. The store exclusively owns the session —
//! callers that issue requests borrow a [`Session`], never the store.

use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::Result;

// ─── Types ───────────────────────────────────────────────────────────────────

/// The backend's account record, as returned by login and `/auth/user/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:           i64,
  pub username:     String,
  pub email:        String,
  pub is_superuser: bool,
  pub is_staff:     bool,
}

/// Current identity + bearer token. `Default` is the unauthenticated state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
  pub user:  Option<User>,
  pub token: Option<String>,
  #[serde(rename = "isAuthenticated")]
  pub authenticated: bool,
}

impl Session {
  /// The bearer token, when one is held.
  pub fn bearer(&self) -> Option<&str> {
    self.token.as_deref()
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Durable owner of the [`Session`].
#[derive(Debug)]
pub struct SessionStore {
  path:    PathBuf,
  session: Session,
}

impl SessionStore {
  /// File name of the durable record inside the state directory.
  pub const FILE_NAME: &'static str = "auth-storage.json";

  /// Open the store rooted at `state_dir`, rehydrating any persisted
  /// session. A missing record yields an unauthenticated session; a
  /// corrupt record is logged and discarded rather than crashing startup.
  pub fn open(state_dir: impl AsRef<Path>) -> Result<Self> {
    let path = state_dir.as_ref().join(Self::FILE_NAME);

    let session = match fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
          tracing::warn!("discarding corrupt session record {path:?}: {e}");
          Session::default()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Session::default(),
      Err(e) => return Err(e.into()),
    };

    Ok(Self { path, session })
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn user(&self) -> Option<&User> {
    self.session.user.as_ref()
  }

  pub fn token(&self) -> Option<&str> {
    self.session.bearer()
  }

  pub fn is_authenticated(&self) -> bool {
    self.session.authenticated
  }

  /// Store `user` and `token` in memory and in the durable record.
  pub fn set_auth(&mut self, user: User, token: String) -> Result<()> {
    self.session = Session {
      user:  Some(user),
      token: Some(token),
      authenticated: true,
    };
    self.persist()
  }

  /// Remove the durable record and reset to unauthenticated.
  pub fn clear_auth(&mut self) -> Result<()> {
    self.session = Session::default();
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }

  fn persist(&self) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&self.path, serde_json::to_string_pretty(&self.session)?)?;
    Ok(())
  }
}
