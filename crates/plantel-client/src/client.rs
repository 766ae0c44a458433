//! Async HTTP client wrapping the roster JSON API.
//!
//! One request/response per operation: nothing is retried, and an expired
//! or missing token surfaces as [`Error::Auth`] for the caller to handle.

use bytes::Bytes;
use plantel_core::employee::{EmployeeDraft, EmployeeRecord};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
  Error, Result,
  session::{Session, User},
};

// ─── Config and wire types ───────────────────────────────────────────────────

/// Connection settings for the roster API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Login form body for `POST /auth/login/`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// `POST /auth/login/` response: a JWT pair plus the account record.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
  pub access:  String,
  pub refresh: String,
  pub user:    User,
}

/// Async HTTP client for the roster REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. The
/// client holds no credentials; authenticated calls borrow a [`Session`].
#[derive(Clone)]
pub struct ApiClient {
  http:   Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(Error::Http)?;
    Ok(Self { http, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn bearer(
    &self,
    req: reqwest::RequestBuilder,
    session: &Session,
  ) -> reqwest::RequestBuilder {
    match session.bearer() {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Map error statuses to the taxonomy; pass successes through.
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED {
      return Err(Error::Auth);
    }

    // The backend reports failures as `{"error": "…"}`.
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
      .unwrap_or_default();
    Err(Error::Api {
      status: status.as_u16(),
      message,
    })
  }

  // ── Authentication ────────────────────────────────────────────────────────

  /// `POST /api/auth/login/`
  pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
    let resp = self
      .http
      .post(self.url("/auth/login/"))
      .json(credentials)
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `GET /api/auth/user/`
  pub async fn current_user(&self, session: &Session) -> Result<User> {
    let resp = self
      .bearer(self.http.get(self.url("/auth/user/")), session)
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `POST /api/auth/logout/` — the backend's logout is advisory; the
  /// durable session record is cleared client-side regardless.
  pub async fn logout(&self, session: &Session) -> Result<()> {
    let resp = self
      .bearer(self.http.post(self.url("/auth/logout/")), session)
      .send()
      .await
      .map_err(Error::from_transport)?;

    Self::check(resp).await?;
    Ok(())
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  /// `GET /api/trabajadores/?anio=<year>` — an empty array is a valid,
  /// non-error result.
  pub async fn list_employees(
    &self,
    session: &Session,
    year: i32,
  ) -> Result<Vec<EmployeeRecord>> {
    let resp = self
      .bearer(self.http.get(self.url("/trabajadores/")), session)
      .query(&[("anio", year.to_string())])
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `GET /api/trabajadores/?search=<q>` — server-side search across name
  /// and document fields.
  pub async fn search_employees(
    &self,
    session: &Session,
    query: &str,
  ) -> Result<Vec<EmployeeRecord>> {
    let resp = self
      .bearer(self.http.get(self.url("/trabajadores/")), session)
      .query(&[("search", query)])
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `GET /api/trabajadores/{id}/`
  pub async fn get_employee(
    &self,
    session: &Session,
    id: i64,
  ) -> Result<EmployeeRecord> {
    let resp = self
      .bearer(self.http.get(self.url(&format!("/trabajadores/{id}/"))), session)
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `POST /api/trabajadores/` — pass-through create.
  pub async fn create_employee(
    &self,
    session: &Session,
    draft: &EmployeeDraft,
  ) -> Result<EmployeeRecord> {
    let resp = self
      .bearer(self.http.post(self.url("/trabajadores/")), session)
      .json(draft)
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `PATCH /api/trabajadores/{id}/` — pass-through partial update.
  pub async fn update_employee(
    &self,
    session: &Session,
    id: i64,
    draft: &EmployeeDraft,
  ) -> Result<EmployeeRecord> {
    let resp = self
      .bearer(
        self.http.patch(self.url(&format!("/trabajadores/{id}/"))),
        session,
      )
      .json(draft)
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.json().await.map_err(Error::Decode)
  }

  /// `DELETE /api/trabajadores/{id}/`
  pub async fn delete_employee(&self, session: &Session, id: i64) -> Result<()> {
    let resp = self
      .bearer(
        self.http.delete(self.url(&format!("/trabajadores/{id}/"))),
        session,
      )
      .send()
      .await
      .map_err(Error::from_transport)?;

    Self::check(resp).await?;
    Ok(())
  }

  // ── Export ────────────────────────────────────────────────────────────────

  /// `GET /api/trabajadores/exportar-excel/` — the workbook is generated
  /// server-side; this returns its raw bytes. No progress reporting and no
  /// cancellation once triggered.
  pub async fn export_excel(&self, session: &Session) -> Result<Bytes> {
    let resp = self
      .bearer(
        self.http.get(self.url("/trabajadores/exportar-excel/")),
        session,
      )
      .send()
      .await
      .map_err(Error::from_transport)?;

    let resp = Self::check(resp).await?;
    resp.bytes().await.map_err(Error::Decode)
  }
}
