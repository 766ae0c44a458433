//! Integration tests for the API client and session store, run against an
//! in-process mock of the roster backend.

use std::collections::HashMap;

use axum::{
  Json, Router,
  extract::Path as UrlPath,
  extract::Query,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
  routing::get,
  routing::post,
};
use serde_json::{Value, json};

use crate::{
  ApiClient, ApiConfig, Credentials, Error, Session, SessionStore, download,
};

const TOKEN: &str = "tok123";

// ─── Mock backend ────────────────────────────────────────────────────────────

fn user_json() -> Value {
  json!({
    "id": 1,
    "username": "admin",
    "email": "admin@example.com",
    "is_superuser": true,
    "is_staff": true
  })
}

fn record_json(id: i64, full_name: &str, number: &str) -> Value {
  let (first, last) = full_name.split_once(' ').unwrap_or((full_name, ""));
  json!({
    "id": id,
    "tipo": "CC",
    "numero": number,
    "fecha_expedicion_cedula": "2015-03-02",
    "fecha_nacimiento": "1997-06-14",
    "primer_apellido": last,
    "segundo_apellido": null,
    "primer_nombre": first,
    "segundo_nombre": null,
    "nombre_completo": full_name,
    "edad": 28,
    "contratacion": {
      "id": id * 10,
      "trabajador": id,
      "tipo_contrato": "TERMINO_FIJO",
      "cargo": "Auxiliar",
      "salario_contratado": "1423500.00",
      "municipio_base": "PASTO",
      "fecha_inicio_contrato": "2025-01-15",
      "fecha_creacion": "2025-01-10T12:00:00Z",
      "fecha_actualizacion": "2025-01-10T12:00:00Z"
    },
    "fecha_creacion": "2025-01-10T12:00:00Z",
    "fecha_actualizacion": "2025-01-10T12:00:00Z"
  })
}

fn authorized(headers: &HeaderMap) -> bool {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .map(|v| v == format!("Bearer {TOKEN}"))
    .unwrap_or(false)
}

fn unauthorized() -> Response {
  (
    StatusCode::UNAUTHORIZED,
    Json(json!({"error": "Las credenciales de autenticación no se proveyeron."})),
  )
    .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
  if body["username"] == "admin" && body["password"] == "secret" {
    Json(json!({
      "access": TOKEN,
      "refresh": "ref456",
      "user": user_json()
    }))
    .into_response()
  } else {
    (
      StatusCode::UNAUTHORIZED,
      Json(json!({"error": "Credenciales inválidas"})),
    )
      .into_response()
  }
}

async fn current_user(headers: HeaderMap) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  Json(user_json()).into_response()
}

async fn logout(headers: HeaderMap) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  Json(json!({"message": "Logout exitoso."})).into_response()
}

async fn list_employees(
  headers: HeaderMap,
  Query(params): Query<HashMap<String, String>>,
) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  if let Some(q) = params.get("search") {
    let hits: Vec<Value> = if "Ana Ruiz".contains(q.as_str()) {
      vec![record_json(1, "Ana Ruiz", "1085312345")]
    } else {
      vec![]
    };
    return Json(Value::Array(hits)).into_response();
  }
  match params.get("anio").map(String::as_str) {
    Some("2025") => Json(json!([
      record_json(1, "Ana Ruiz", "1085312345"),
      record_json(2, "Ana Ruiz", "1085312345"),
      record_json(3, "Bea Paz", "37086123"),
    ]))
    .into_response(),
    _ => Json(json!([])).into_response(),
  }
}

async fn get_employee(headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  Json(record_json(id, "Ana Ruiz", "1085312345")).into_response()
}

async fn create_employee(headers: HeaderMap, Json(body): Json<Value>) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  let name = body["primer_nombre"].as_str().unwrap_or("Nueva");
  (
    StatusCode::CREATED,
    Json(record_json(99, &format!("{name} Persona"), "99")),
  )
    .into_response()
}

async fn update_employee(
  headers: HeaderMap,
  UrlPath(id): UrlPath<i64>,
  Json(_body): Json<Value>,
) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  Json(record_json(id, "Ana Ruiz", "1085312345")).into_response()
}

async fn delete_employee(headers: HeaderMap, UrlPath(_id): UrlPath<i64>) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  StatusCode::NO_CONTENT.into_response()
}

async fn export_excel(headers: HeaderMap) -> Response {
  if !authorized(&headers) {
    return unauthorized();
  }
  (
    [(
      header::CONTENT_TYPE,
      "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    )],
    b"PK\x03\x04 not a real workbook".to_vec(),
  )
    .into_response()
}

fn router() -> Router {
  Router::new()
    .route("/api/auth/login/", post(login))
    .route("/api/auth/user/", get(current_user))
    .route("/api/auth/logout/", post(logout))
    .route(
      "/api/trabajadores/",
      get(list_employees).post(create_employee),
    )
    .route(
      "/api/trabajadores/{id}/",
      get(get_employee)
        .patch(update_employee)
        .delete(delete_employee),
    )
    .route("/api/trabajadores/exportar-excel/", get(export_excel))
}

async fn spawn_backend() -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("bind mock backend");
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, router()).await.unwrap();
  });
  format!("http://{addr}")
}

fn client(base_url: &str) -> ApiClient {
  ApiClient::new(ApiConfig {
    base_url: base_url.to_string(),
  })
  .expect("build client")
}

fn authed_session() -> Session {
  Session {
    user:  None,
    token: Some(TOKEN.into()),
    authenticated: true,
  }
}

// ─── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_tokens_and_user() {
  let base = spawn_backend().await;
  let resp = client(&base)
    .login(&Credentials {
      username: "admin".into(),
      password: "secret".into(),
    })
    .await
    .unwrap();

  assert_eq!(resp.access, TOKEN);
  assert_eq!(resp.refresh, "ref456");
  assert_eq!(resp.user.username, "admin");
}

#[tokio::test]
async fn bad_credentials_are_an_auth_error() {
  let base = spawn_backend().await;
  let err = client(&base)
    .login(&Credentials {
      username: "admin".into(),
      password: "wrong".into(),
    })
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Auth));
  assert_eq!(err.user_message(), "Usuario o contraseña incorrectos");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
  // Grab a free port, then drop the listener so nothing is bound.
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let base = format!("http://{}", listener.local_addr().unwrap());
  drop(listener);

  let err = client(&base)
    .login(&Credentials {
      username: "admin".into(),
      password: "secret".into(),
    })
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Network(_)));
  assert_eq!(
    err.user_message(),
    "No se puede conectar al servidor. Verifica que el backend esté corriendo."
  );
}

#[tokio::test]
async fn current_user_and_logout_use_the_borrowed_token() {
  let base = spawn_backend().await;
  let api = client(&base);
  let session = authed_session();

  let user = api.current_user(&session).await.unwrap();
  assert_eq!(user.username, "admin");
  api.logout(&session).await.unwrap();
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_sends_the_year_and_bearer_token() {
  let base = spawn_backend().await;
  let records = client(&base)
    .list_employees(&authed_session(), 2025)
    .await
    .unwrap();

  let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![1, 2, 3]);
  // Nested sub-record decoded; absent ones stay None.
  assert!(records[0].contract.is_some());
  assert!(records[0].offboarding.is_none());
}

#[tokio::test]
async fn an_empty_year_is_a_valid_result() {
  let base = spawn_backend().await;
  let records = client(&base)
    .list_employees(&authed_session(), 2024)
    .await
    .unwrap();
  assert!(records.is_empty());
}

#[tokio::test]
async fn a_missing_token_surfaces_as_auth_error() {
  let base = spawn_backend().await;
  let err = client(&base)
    .list_employees(&Session::default(), 2025)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Auth));
}

#[tokio::test]
async fn search_hits_the_server_side_filter() {
  let base = spawn_backend().await;
  let records = client(&base)
    .search_employees(&authed_session(), "Ana")
    .await
    .unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].full_name, "Ana Ruiz");
}

#[tokio::test]
async fn crud_pass_through_round_trips() {
  let base = spawn_backend().await;
  let api = client(&base);
  let session = authed_session();

  let draft = plantel_core::employee::EmployeeDraft {
    first_name: Some("Carla".into()),
    year: Some(2025),
    ..Default::default()
  };
  let created = api.create_employee(&session, &draft).await.unwrap();
  assert_eq!(created.id, 99);

  let fetched = api.get_employee(&session, 1).await.unwrap();
  assert_eq!(fetched.id, 1);

  let updated = api.update_employee(&session, 1, &draft).await.unwrap();
  assert_eq!(updated.id, 1);

  api.delete_employee(&session, 1).await.unwrap();
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn export_saves_a_timestamped_workbook() {
  let base = spawn_backend().await;
  let bytes = client(&base).export_excel(&authed_session()).await.unwrap();
  assert!(bytes.starts_with(b"PK"));

  let dir = tempfile::tempdir().unwrap();
  let at = chrono::Local::now();
  let path = download::save_export(&bytes, dir.path(), at).unwrap();

  assert_eq!(
    path.file_name().unwrap().to_str().unwrap(),
    download::export_file_name(at)
  );
  assert_eq!(std::fs::read(&path).unwrap(), bytes.to_vec());
}

#[tokio::test]
async fn a_failed_export_writes_no_file() {
  let base = spawn_backend().await;
  let dir = tempfile::tempdir().unwrap();

  // No token → the backend rejects the download before any bytes arrive.
  let err = client(&base)
    .export_excel(&Session::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Auth));
  assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ─── Session store ───────────────────────────────────────────────────────────

#[test]
fn a_missing_record_rehydrates_unauthenticated() {
  let dir = tempfile::tempdir().unwrap();
  let store = SessionStore::open(dir.path()).unwrap();
  assert!(!store.is_authenticated());
  assert!(store.token().is_none());
  assert!(store.user().is_none());
}

#[test]
fn set_auth_survives_a_reopen() {
  let dir = tempfile::tempdir().unwrap();

  let mut store = SessionStore::open(dir.path()).unwrap();
  let user: crate::User = serde_json::from_value(user_json()).unwrap();
  store.set_auth(user.clone(), TOKEN.into()).unwrap();

  // Simulated reload: a fresh store over the same directory.
  let rehydrated = SessionStore::open(dir.path()).unwrap();
  assert!(rehydrated.is_authenticated());
  assert_eq!(rehydrated.token(), Some(TOKEN));
  assert_eq!(rehydrated.user(), Some(&user));
}

#[test]
fn clear_auth_removes_the_durable_record() {
  let dir = tempfile::tempdir().unwrap();

  let mut store = SessionStore::open(dir.path()).unwrap();
  let user: crate::User = serde_json::from_value(user_json()).unwrap();
  store.set_auth(user, TOKEN.into()).unwrap();
  store.clear_auth().unwrap();

  assert!(!store.is_authenticated());
  assert!(!dir.path().join(SessionStore::FILE_NAME).exists());

  let rehydrated = SessionStore::open(dir.path()).unwrap();
  assert!(!rehydrated.is_authenticated());
}

#[test]
fn a_corrupt_record_degrades_to_unauthenticated() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join(SessionStore::FILE_NAME), "{not json").unwrap();

  let store = SessionStore::open(dir.path()).unwrap();
  assert!(!store.is_authenticated());
}
