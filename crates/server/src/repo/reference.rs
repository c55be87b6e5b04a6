use shared_types::{
    AppError, DocumentType, Lawyer, Place, Specialization, Stage, StageFlowStep, CITY_PLACE_TYPE,
};
use sqlx::{PgConnection, Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const PLACE_COLUMNS: &str =
    "cod_lugar, lug_cod_lugar, id_tipo_lugar, nom_lugar, dire_lugar, tel_lugar, email_lugar";

const STEP_SELECT: &str = "SELECT ee.cod_especializacion, ee.paso_etapa, ee.cod_etapa, et.nom_etapa, \
            ee.id_impugna, ee.n_instancia \
     FROM especia_etapa ee \
     JOIN etapa_procesal et ON et.cod_etapa = ee.cod_etapa";

// ── Specializations and stages ──────────────────────────────────────

pub async fn list_specializations(pool: &Pool<Postgres>) -> Result<Vec<Specialization>, AppError> {
    sqlx::query_as::<_, Specialization>(
        "SELECT cod_especializacion, nom_especializacion FROM especializacion ORDER BY nom_especializacion",
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_stages(pool: &Pool<Postgres>) -> Result<Vec<Stage>, AppError> {
    sqlx::query_as::<_, Stage>("SELECT cod_etapa, nom_etapa FROM etapa_procesal ORDER BY cod_etapa")
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Stage flow of a specialization in step order.
pub async fn list_stage_flow(
    pool: &Pool<Postgres>,
    cod_especializacion: &str,
) -> Result<Vec<StageFlowStep>, AppError> {
    let sql = format!("{STEP_SELECT} WHERE ee.cod_especializacion = $1 ORDER BY ee.paso_etapa");
    sqlx::query_as::<_, StageFlowStep>(&sql)
        .bind(cod_especializacion)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_stage_flow_step(
    pool: &Pool<Postgres>,
    cod_especializacion: &str,
    paso_etapa: i32,
) -> Result<Option<StageFlowStep>, AppError> {
    let sql = format!("{STEP_SELECT} WHERE ee.cod_especializacion = $1 AND ee.paso_etapa = $2");
    sqlx::query_as::<_, StageFlowStep>(&sql)
        .bind(cod_especializacion)
        .bind(paso_etapa)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

// ── Lawyers ─────────────────────────────────────────────────────────

/// Lawyers practising a specialization, by surname then name.
pub async fn list_lawyers_by_specialization(
    pool: &Pool<Postgres>,
    cod_especializacion: &str,
) -> Result<Vec<Lawyer>, AppError> {
    sqlx::query_as::<_, Lawyer>(
        r#"
        SELECT a.cedula, a.nombre, a.apellido, a.n_tarjeta_profesional
        FROM abogado a
        JOIN especializacion_abogado ea ON ea.cedula = a.cedula
        WHERE ea.cod_especializacion = $1
        ORDER BY a.apellido, a.nombre
        "#,
    )
    .bind(cod_especializacion)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_lawyer(pool: &Pool<Postgres>, cedula: &str) -> Result<Option<Lawyer>, AppError> {
    sqlx::query_as::<_, Lawyer>(
        "SELECT cedula, nombre, apellido, n_tarjeta_profesional FROM abogado WHERE cedula = $1",
    )
    .bind(cedula)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub(crate) async fn lawyer_has_specialization(
    conn: &mut PgConnection,
    cedula: &str,
    cod_especializacion: &str,
) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM especializacion_abogado \
         WHERE cedula = $1 AND cod_especializacion = $2)",
    )
    .bind(cedula)
    .bind(cod_especializacion)
    .fetch_one(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

// ── Places ──────────────────────────────────────────────────────────

/// Root places tagged as cities. Child rows never qualify, whatever their tag.
pub async fn list_cities(pool: &Pool<Postgres>) -> Result<Vec<Place>, AppError> {
    let sql = format!(
        "SELECT {PLACE_COLUMNS} FROM lugar \
         WHERE lug_cod_lugar IS NULL AND id_tipo_lugar = $1 \
         ORDER BY nom_lugar"
    );
    sqlx::query_as::<_, Place>(&sql)
        .bind(CITY_PLACE_TYPE)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Courts, tribunals and offices located in a city.
pub async fn list_entities_by_city(
    pool: &Pool<Postgres>,
    cod_ciudad: &str,
) -> Result<Vec<Place>, AppError> {
    let sql = format!("SELECT {PLACE_COLUMNS} FROM lugar WHERE lug_cod_lugar = $1 ORDER BY nom_lugar");
    sqlx::query_as::<_, Place>(&sql)
        .bind(cod_ciudad)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_place(pool: &Pool<Postgres>, cod_lugar: &str) -> Result<Option<Place>, AppError> {
    let sql = format!("SELECT {PLACE_COLUMNS} FROM lugar WHERE cod_lugar = $1");
    sqlx::query_as::<_, Place>(&sql)
        .bind(cod_lugar)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub(crate) async fn place_exists(conn: &mut PgConnection, cod_lugar: &str) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM lugar WHERE cod_lugar = $1)")
        .bind(cod_lugar)
        .fetch_one(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

// ── Document types ──────────────────────────────────────────────────

pub async fn list_document_types(pool: &Pool<Postgres>) -> Result<Vec<DocumentType>, AppError> {
    sqlx::query_as::<_, DocumentType>(
        "SELECT id_tipo_doc, desc_tipo_doc FROM tipo_documento ORDER BY id_tipo_doc",
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
