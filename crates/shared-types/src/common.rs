use serde::{Deserialize, Deserializer, Serialize};

/// Compound key identifying a case file ("expediente").
///
/// Every event, result and document hangs off exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CaseFileKey {
    pub cod_especializacion: String,
    pub paso_etapa: i32,
    pub no_caso: i32,
    pub consec_expe: i32,
}

impl CaseFileKey {
    pub fn new(
        cod_especializacion: impl Into<String>,
        paso_etapa: i32,
        no_caso: i32,
        consec_expe: i32,
    ) -> Self {
        Self {
            cod_especializacion: cod_especializacion.into(),
            paso_etapa,
            no_caso,
            consec_expe,
        }
    }
}

impl std::fmt::Display for CaseFileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.cod_especializacion, self.paso_etapa, self.no_caso, self.consec_expe
        )
    }
}

/// Acknowledgement returned by update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub success: bool,
    pub mensaje: String,
}

impl MessageResponse {
    pub fn ok(mensaje: impl Into<String>) -> Self {
        Self {
            success: true,
            mensaje: mensaje.into(),
        }
    }
}

/// Accept a monetary amount either as a JSON number or as a numeric string.
///
/// The intake form posts `"500000"`; API clients post `500000`.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(i64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {s:?}"))),
    }
}

/// Reject values made only of whitespace. `length(min = 1)` counts `"   "`
/// as present.
#[cfg(feature = "validation")]
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
