//! Client error taxonomy.
//!
//! Three cases matter to the UI: bad credentials (`Auth`), an unreachable
//! backend (`Network`), and everything else. [`Error::user_message`] maps
//! each to the Spanish copy the interface shows; `Display` stays English
//! for logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// HTTP 401 — bad credentials or a missing/expired token. Never retried
  /// or refreshed automatically; recovery is user-initiated.
  #[error("unauthorized")]
  Auth,

  /// The backend could not be reached at all.
  #[error("backend unreachable: {0}")]
  Network(#[source] reqwest::Error),

  /// A non-401 error status with the backend's `{"error": …}` message.
  #[error("api returned {status}: {message}")]
  Api { status: u16, message: String },

  /// The response body did not decode into the expected shape.
  #[error("decoding response: {0}")]
  Decode(#[source] reqwest::Error),

  /// Any other transport failure.
  #[error("http error: {0}")]
  Http(#[source] reqwest::Error),

  /// Reading or writing the durable session record or an export file.
  #[error("storage error: {0}")]
  Storage(#[from] std::io::Error),

  #[error("serialising session record: {0}")]
  Json(#[from] serde_json::Error),
}

impl Error {
  /// Classify a transport-level reqwest failure.
  pub(crate) fn from_transport(e: reqwest::Error) -> Self {
    if e.is_connect() || e.is_timeout() {
      Self::Network(e)
    } else if e.is_decode() {
      Self::Decode(e)
    } else {
      Self::Http(e)
    }
  }

  /// The Spanish, user-facing message for this error.
  pub fn user_message(&self) -> &'static str {
    match self {
      Self::Auth => "Usuario o contraseña incorrectos",
      Self::Network(_) => {
        "No se puede conectar al servidor. Verifica que el backend esté corriendo."
      }
      _ => "Ocurrió un error. Intenta nuevamente.",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
