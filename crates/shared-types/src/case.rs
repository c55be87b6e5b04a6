use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::deserialize_amount;

// ── Lifecycle ───────────────────────────────────────────────────────

/// Case lifecycle. A case is active until it gets an end date, then closed
/// for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum CaseStatus {
    Active,
    Closed,
}

// ── DB row struct ───────────────────────────────────────────────────

/// A legal matter ("caso") opened for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub no_caso: i32,
    pub cod_cliente: String,
    pub cod_especializacion: String,
    pub fecha_inicio: NaiveDate,
    /// `None` while the case is active.
    pub fecha_fin: Option<NaiveDate>,
    pub valor: i64,
}

impl Case {
    pub fn status(&self) -> CaseStatus {
        if self.fecha_fin.is_some() {
            CaseStatus::Closed
        } else {
            CaseStatus::Active
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status() == CaseStatus::Closed
    }
}

// ── Request / response types ────────────────────────────────────────

/// Request to open a case. The case number is assigned by the server and the
/// case always starts active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Client code is required"))
    )]
    pub cod_cliente: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Specialization is required"))
    )]
    pub cod_especializacion: String,
    pub fecha_inicio: NaiveDate,
    #[serde(deserialize_with = "deserialize_amount")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "Value must be non-negative"))
    )]
    pub valor: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseResponse {
    pub success: bool,
    pub no_caso: i32,
    pub mensaje: String,
}

/// Request to update an active case. Supplying `fechaFin` closes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Specialization is required"))
    )]
    pub cod_especializacion: String,
    pub fecha_inicio: NaiveDate,
    #[serde(default)]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_amount")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "Value must be non-negative"))
    )]
    pub valor: i64,
}
