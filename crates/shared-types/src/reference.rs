//! Reference and workflow tables: specializations, procedural stages, the
//! per-specialization stage flow, lawyers, places and document types.

use serde::{Deserialize, Serialize};

/// Place type tag marking a root city entry.
pub const CITY_PLACE_TYPE: &str = "CIUDAD";

/// Legal practice area. Decides which stage flow a case follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Specialization {
    pub cod_especializacion: String,
    pub nom_especializacion: String,
}

/// Procedural stage ("etapa procesal").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub cod_etapa: String,
    pub nom_etapa: String,
}

/// One step of a specialization's stage flow, joined with the stage name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StageFlowStep {
    pub cod_especializacion: String,
    pub paso_etapa: i32,
    pub cod_etapa: String,
    pub nom_etapa: String,
    /// Appeal/impugnation marker, when the step is a challenge.
    pub id_impugna: Option<String>,
    pub n_instancia: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    pub cedula: String,
    pub nombre: String,
    pub apellido: String,
    pub n_tarjeta_profesional: String,
}

/// A city, or an entity (court, tribunal, office) located in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub cod_lugar: String,
    /// Parent city; `None` for root entries.
    pub lug_cod_lugar: Option<String>,
    pub id_tipo_lugar: String,
    pub nom_lugar: String,
    pub dire_lugar: String,
    pub tel_lugar: String,
    pub email_lugar: Option<String>,
}

/// Identity document type accepted for clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub id_tipo_doc: String,
    pub desc_tipo_doc: String,
}
