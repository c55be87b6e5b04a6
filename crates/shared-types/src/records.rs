//! Append-only child records of a case file: events ("sucesos"), results
//! ("resultados") and documents ("documentos").

use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::CaseFileKey;

/// Something that happened on a case file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CaseEvent {
    pub con_suceso: i32,
    pub desc_suceso: String,
}

/// Outcome recorded against a case file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub con_resul: i32,
    pub desc_resul: String,
}

/// Pointer to where a case file document is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CaseDocument {
    pub con_doc: i32,
    pub ubica_doc: String,
}

// ── Create requests ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(flatten)]
    pub expediente: CaseFileKey,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 500, message = "Description is required"))
    )]
    pub desc_suceso: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CreateResultRequest {
    #[serde(flatten)]
    pub expediente: CaseFileKey,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 500, message = "Description is required"))
    )]
    pub desc_resul: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[serde(flatten)]
    pub expediente: CaseFileKey,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 200, message = "Document location is required"))
    )]
    pub ubica_doc: String,
}

// ── Create responses ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub success: bool,
    pub con_suceso: i32,
    pub mensaje: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateResultResponse {
    pub success: bool,
    pub con_resul: i32,
    pub mensaje: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentResponse {
    pub success: bool,
    pub con_doc: i32,
    pub mensaje: String,
}
