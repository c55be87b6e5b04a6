use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::CaseFileKey;
use crate::records::{CaseDocument, CaseEvent, CaseResult};

// ── DB row structs ──────────────────────────────────────────────────

/// A case file ("expediente") positioned at one step of its
/// specialization's stage flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub cod_especializacion: String,
    pub paso_etapa: i32,
    pub no_caso: i32,
    pub consec_expe: i32,
    pub cod_etapa: Option<String>,
    pub cod_lugar: Option<String>,
    /// Assigned lawyer.
    pub cedula: Option<String>,
    pub fecha_etapa: NaiveDate,
}

impl CaseFile {
    pub fn key(&self) -> CaseFileKey {
        CaseFileKey::new(
            self.cod_especializacion.clone(),
            self.paso_etapa,
            self.no_caso,
            self.consec_expe,
        )
    }
}

/// Case file joined with its stage, place and stage-flow step.
/// Stage and place are left-joined, so their names may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CaseFileView {
    pub cod_especializacion: String,
    pub paso_etapa: i32,
    pub no_caso: i32,
    pub consec_expe: i32,
    pub cod_etapa: Option<String>,
    pub cod_lugar: Option<String>,
    pub cedula: Option<String>,
    pub fecha_etapa: NaiveDate,
    pub nom_etapa: Option<String>,
    pub nom_lugar: Option<String>,
    pub id_impugna: Option<String>,
    pub n_instancia: Option<i32>,
}

// ── API response types ──────────────────────────────────────────────

/// Denormalized case file with every event, result and document attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseFileDetail {
    #[serde(flatten)]
    pub expediente: CaseFileView,
    pub sucesos: Vec<CaseEvent>,
    pub resultados: Vec<CaseResult>,
    pub documentos: Vec<CaseDocument>,
}

// ── Request types ───────────────────────────────────────────────────

/// Request to open a case file. Specialization and first step come from the
/// case and its stage flow; the sequence number is assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseFileRequest {
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Case number must be positive"))
    )]
    pub no_caso: i32,
    #[serde(default)]
    pub cod_lugar: Option<String>,
    #[serde(default)]
    pub cedula: Option<String>,
    pub fecha_etapa: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseFileResponse {
    pub success: bool,
    pub cod_especializacion: String,
    pub paso_etapa: i32,
    pub no_caso: i32,
    pub consec_expe: i32,
    pub mensaje: String,
}

/// Request to record where a case file currently sits and who handles it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseFileRequest {
    #[serde(default)]
    pub cod_lugar: Option<String>,
    #[serde(default)]
    pub cedula: Option<String>,
    pub fecha_etapa: NaiveDate,
}
