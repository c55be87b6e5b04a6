use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A law-office client ("cliente").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub cod_cliente: String,
    pub id_tipo_doc: String,
    pub nom_cliente: String,
    pub apell_cliente: String,
    /// Identity document number. Unique and never updated.
    pub n_documento: String,
}

/// Format the numeric part of a client code (`7` → `C007`).
pub fn client_code(n: i64) -> String {
    format!("C{:03}", n)
}

/// Request to register a client. The code is assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[cfg_attr(
        feature = "validation",
        validate(
            length(min = 1, max = 5, message = "Document type is required"),
            custom(function = "crate::common::not_blank", message = "Document type is required")
        )
    )]
    pub id_tipo_doc: String,
    #[cfg_attr(
        feature = "validation",
        validate(
            length(min = 1, max = 30, message = "Name is required"),
            custom(function = "crate::common::not_blank", message = "Name is required")
        )
    )]
    pub nom_cliente: String,
    #[cfg_attr(
        feature = "validation",
        validate(
            length(min = 1, max = 30, message = "Surname is required"),
            custom(function = "crate::common::not_blank", message = "Surname is required")
        )
    )]
    pub apell_cliente: String,
    #[cfg_attr(
        feature = "validation",
        validate(
            length(min = 1, max = 20, message = "Document number is required"),
            custom(function = "crate::common::not_blank", message = "Document number is required")
        )
    )]
    pub n_documento: String,
}

/// Response for a newly registered client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateClientResponse {
    pub success: bool,
    pub cod_cliente: String,
    pub mensaje: String,
}
