//! Employee record types — the wire model of the roster backend.
//!
//! One [`EmployeeRecord`] is one hiring/contract entry for a person in a
//! given year, *not* one person: the same full name may appear on several
//! records. The five sub-records are each independently present-or-absent,
//! so every one of them is an `Option` and every consumer handles the
//! absent case explicitly.
//!
//! Field names are English on the Rust side and map to the backend's
//! Spanish wire names through `#[serde(rename)]`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Identification ──────────────────────────────────────────────────────────

/// Colombian identity-document classes accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
  /// Cédula de Ciudadanía.
  Cc,
  /// Cédula de Extranjería.
  Ce,
  /// Pasaporte.
  Pa,
  /// Tarjeta de Identidad.
  Ti,
}

impl DocumentType {
  /// Long-form Spanish label, as shown in the detail view.
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Cc => "Cédula de Ciudadanía",
      Self::Ce => "Cédula de Extranjería",
      Self::Pa => "Pasaporte",
      Self::Ti => "Tarjeta de Identidad",
    }
  }
}

// ─── Contract sub-record ─────────────────────────────────────────────────────

/// Contract modality under Colombian labour law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
  PrestacionServicios,
  TerminoIndefinido,
  TerminoFijo,
  ObraLabor,
  Aprendizaje,
}

impl ContractType {
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::PrestacionServicios => "Prestación de Servicios",
      Self::TerminoIndefinido => "Término Indefinido",
      Self::TerminoFijo => "Término Fijo",
      Self::ObraLabor => "Obra o Labor",
      Self::Aprendizaje => "Aprendizaje",
    }
  }
}

/// Contract details (`contratacion` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
  pub id:            i64,
  #[serde(rename = "trabajador")]
  pub employee_id:   i64,
  #[serde(rename = "tipo_contrato")]
  pub contract_type: ContractType,
  #[serde(rename = "tipo_contrato_display", default)]
  pub contract_type_display: Option<String>,
  #[serde(rename = "cargo")]
  pub position:      String,
  /// Decimal-as-string on the wire; formatted with
  /// [`format::cop`](crate::format::cop) for display.
  #[serde(rename = "salario_contratado")]
  pub salary:        String,
  #[serde(rename = "municipio_base")]
  pub base_municipality: String,
  #[serde(rename = "municipio_base_display", default)]
  pub base_municipality_display: Option<String>,
  #[serde(rename = "fecha_inicio_contrato", default)]
  pub start_date:    Option<NaiveDate>,
  #[serde(rename = "fecha_final_contrato", default)]
  pub end_date:      Option<NaiveDate>,
  #[serde(rename = "contrato_activo", default)]
  pub active:        Option<bool>,
  #[serde(rename = "dias_restantes", default)]
  pub days_remaining: Option<i64>,
  #[serde(rename = "fecha_creacion")]
  pub created_at:    DateTime<Utc>,
  #[serde(rename = "fecha_actualizacion")]
  pub updated_at:    DateTime<Utc>,
}

// ─── Onboarding sub-record ───────────────────────────────────────────────────

/// Entry paperwork (`ingreso` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Onboarding {
  pub id:               i64,
  #[serde(rename = "trabajador")]
  pub employee_id:      i64,
  #[serde(rename = "fecha_ingreso", default)]
  pub entry_date:       Option<NaiveDate>,
  #[serde(rename = "examen_ingreso", default)]
  pub entry_exam_date:  Option<NaiveDate>,
  /// Personal protective equipment delivery.
  #[serde(rename = "fecha_entrega_epp", default)]
  pub ppe_delivery:     Option<NaiveDate>,
  /// Work-uniform delivery.
  #[serde(rename = "fecha_entrega_dotacion", default)]
  pub uniform_delivery: Option<NaiveDate>,
  #[serde(rename = "fecha_creacion")]
  pub created_at:       DateTime<Utc>,
  #[serde(rename = "fecha_actualizacion")]
  pub updated_at:       DateTime<Utc>,
}

// ─── Offboarding sub-record ──────────────────────────────────────────────────

/// Exit paperwork and settlement (`retiro` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offboarding {
  pub id:                i64,
  #[serde(rename = "trabajador")]
  pub employee_id:       i64,
  #[serde(rename = "fecha_retiro", default)]
  pub exit_date:         Option<NaiveDate>,
  #[serde(rename = "fecha_liquidacion", default)]
  pub settlement_date:   Option<NaiveDate>,
  /// Decimal-as-string on the wire, like [`Contract::salary`].
  #[serde(rename = "valor_liquidacion", default)]
  pub settlement_amount: Option<String>,
  #[serde(rename = "fecha_examen_retiro", default)]
  pub exit_exam_date:    Option<NaiveDate>,
  #[serde(rename = "fecha_creacion")]
  pub created_at:        DateTime<Utc>,
  #[serde(rename = "fecha_actualizacion")]
  pub updated_at:        DateTime<Utc>,
}

// ─── Social security sub-record ──────────────────────────────────────────────

/// Affiliations to the Colombian social-security system
/// (`seguridad_social` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSecurity {
  pub id:          i64,
  #[serde(rename = "trabajador")]
  pub employee_id: i64,
  /// Health provider.
  #[serde(default)]
  pub eps:         Option<String>,
  #[serde(rename = "fecha_afiliacion_eps", default)]
  pub eps_affiliation: Option<NaiveDate>,
  /// Family compensation fund.
  #[serde(rename = "caja_compensacion", default)]
  pub compensation_fund: Option<String>,
  #[serde(rename = "fecha_afiliacion_caja", default)]
  pub compensation_fund_affiliation: Option<NaiveDate>,
  #[serde(rename = "fondo_pension", default)]
  pub pension_fund: Option<String>,
  #[serde(rename = "fecha_afiliacion_pension", default)]
  pub pension_affiliation: Option<NaiveDate>,
  /// Occupational-risk insurer.
  #[serde(rename = "arl", default)]
  pub risk_insurer: Option<String>,
  #[serde(rename = "arl_display", default)]
  pub risk_insurer_display: Option<String>,
  /// Risk class `1`–`5`.
  #[serde(rename = "riesgo", default)]
  pub risk_class:  Option<String>,
  #[serde(rename = "riesgo_display", default)]
  pub risk_class_display: Option<String>,
  #[serde(rename = "fecha_afiliacion_arl", default)]
  pub risk_insurer_affiliation: Option<NaiveDate>,
  #[serde(rename = "fecha_creacion")]
  pub created_at:  DateTime<Utc>,
  #[serde(rename = "fecha_actualizacion")]
  pub updated_at:  DateTime<Utc>,
}

// ─── Project sub-record ──────────────────────────────────────────────────────

/// Project-category assignment flags (`proyecto` on the wire).
/// The five categories are independent booleans, not an enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAssignment {
  pub id:                   i64,
  #[serde(rename = "trabajador")]
  pub employee_id:          i64,
  #[serde(rename = "administrativo")]
  pub administrative:       bool,
  #[serde(rename = "construccion_instalaciones")]
  pub facility_construction: bool,
  #[serde(rename = "construccion_redes")]
  pub network_construction: bool,
  #[serde(rename = "servicios")]
  pub services:             bool,
  #[serde(rename = "mantenimiento_redes")]
  pub network_maintenance:  bool,
  #[serde(rename = "fecha_creacion")]
  pub created_at:           DateTime<Utc>,
  #[serde(rename = "fecha_actualizacion")]
  pub updated_at:           DateTime<Utc>,
}

// ─── EmployeeRecord ──────────────────────────────────────────────────────────

/// One contract record for a person in a given year.
///
/// Read-only from the client's perspective: records are fetched per
/// selected year, held in memory, and discarded on year change. The `id`
/// is unique per record; `full_name` is not unique per person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
  pub id:                 i64,
  #[serde(rename = "tipo")]
  pub document_type:      DocumentType,
  #[serde(rename = "numero")]
  pub document_number:    String,
  #[serde(rename = "fecha_expedicion_cedula")]
  pub document_issued_on: NaiveDate,
  #[serde(rename = "fecha_nacimiento")]
  pub born_on:            NaiveDate,

  #[serde(rename = "primer_apellido")]
  pub first_surname:  String,
  #[serde(rename = "segundo_apellido", default)]
  pub second_surname: Option<String>,
  #[serde(rename = "primer_nombre")]
  pub first_name:     String,
  #[serde(rename = "segundo_nombre", default)]
  pub second_name:    Option<String>,

  /// Server-derived display name; the reconciler's deduplication key.
  #[serde(rename = "nombre_completo")]
  pub full_name: String,
  /// Server-derived from `born_on`.
  #[serde(rename = "edad")]
  pub age:       u32,

  #[serde(rename = "contratacion", default)]
  pub contract:        Option<Contract>,
  #[serde(rename = "ingreso", default)]
  pub onboarding:      Option<Onboarding>,
  #[serde(rename = "retiro", default)]
  pub offboarding:     Option<Offboarding>,
  #[serde(rename = "seguridad_social", default)]
  pub social_security: Option<SocialSecurity>,
  #[serde(rename = "proyecto", default)]
  pub project:         Option<ProjectAssignment>,

  #[serde(rename = "fecha_creacion")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "fecha_actualizacion")]
  pub updated_at: DateTime<Utc>,
}

// ─── EmployeeDraft ───────────────────────────────────────────────────────────

/// Partial payload for the create/update pass-through endpoints.
/// Absent fields are omitted from the serialised body so PATCH semantics
/// hold.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeDraft {
  #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
  pub document_type:      Option<DocumentType>,
  #[serde(rename = "numero", skip_serializing_if = "Option::is_none")]
  pub document_number:    Option<String>,
  #[serde(
    rename = "fecha_expedicion_cedula",
    skip_serializing_if = "Option::is_none"
  )]
  pub document_issued_on: Option<NaiveDate>,
  #[serde(rename = "fecha_nacimiento", skip_serializing_if = "Option::is_none")]
  pub born_on:            Option<NaiveDate>,
  #[serde(rename = "primer_apellido", skip_serializing_if = "Option::is_none")]
  pub first_surname:      Option<String>,
  #[serde(rename = "segundo_apellido", skip_serializing_if = "Option::is_none")]
  pub second_surname:     Option<String>,
  #[serde(rename = "primer_nombre", skip_serializing_if = "Option::is_none")]
  pub first_name:         Option<String>,
  #[serde(rename = "segundo_nombre", skip_serializing_if = "Option::is_none")]
  pub second_name:        Option<String>,
  /// Roster year the record belongs to (e.g. 2024, 2025).
  #[serde(rename = "anio", skip_serializing_if = "Option::is_none")]
  pub year:               Option<i32>,
}
