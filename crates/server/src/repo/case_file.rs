use shared_types::{
    AppError, CaseFile, CaseFileDetail, CaseFileKey, CaseFileView, CreateCaseFileRequest,
    UpdateCaseFileRequest,
};
use sqlx::{PgConnection, Pool, Postgres};

use crate::db;
use crate::error_convert::SqlxErrorExt;
use crate::repo::records::{self, Documents, Events, Results};
use crate::repo::sequence::{ScopeValue, ScopedSequence};
use crate::repo::{case, reference};

/// Case files are numbered per case.
pub const CASE_FILE_SEQUENCE: ScopedSequence =
    ScopedSequence::new("expediente", "consec_expe", &["no_caso"]);

const CASE_FILE_COLUMNS: &str = "cod_especializacion, paso_etapa, no_caso, consec_expe, \
     cod_etapa, cod_lugar, cedula, fecha_etapa";

const KEY_PREDICATE: &str =
    "cod_especializacion = $1 AND paso_etapa = $2 AND no_caso = $3 AND consec_expe = $4";

/// Find a case file by its compound key. With `for_update` the row stays
/// locked until the surrounding transaction ends.
pub async fn find_by_key(
    conn: &mut PgConnection,
    key: &CaseFileKey,
    for_update: bool,
) -> Result<Option<CaseFile>, AppError> {
    let mut sql = format!("SELECT {CASE_FILE_COLUMNS} FROM expediente WHERE {KEY_PREDICATE}");
    if for_update {
        sql.push_str(" FOR UPDATE");
    }
    sqlx::query_as::<_, CaseFile>(&sql)
        .bind(&key.cod_especializacion)
        .bind(key.paso_etapa)
        .bind(key.no_caso)
        .bind(key.consec_expe)
        .fetch_optional(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Case files of a case, by sequence.
pub async fn list_for_case(pool: &Pool<Postgres>, no_caso: i32) -> Result<Vec<CaseFile>, AppError> {
    let sql = format!(
        "SELECT {CASE_FILE_COLUMNS} FROM expediente WHERE no_caso = $1 ORDER BY consec_expe, paso_etapa"
    );
    sqlx::query_as::<_, CaseFile>(&sql)
        .bind(no_caso)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Case file header with stage name, place name and stage-flow attributes.
/// Stage and place are outer-joined; a fresh case file may lack both.
async fn fetch_view(
    conn: &mut PgConnection,
    key: &CaseFileKey,
) -> Result<Option<CaseFileView>, AppError> {
    sqlx::query_as::<_, CaseFileView>(
        r#"
        SELECT e.cod_especializacion, e.paso_etapa, e.no_caso, e.consec_expe,
               e.cod_etapa, e.cod_lugar, e.cedula, e.fecha_etapa,
               et.nom_etapa, l.nom_lugar, ee.id_impugna, ee.n_instancia
        FROM expediente e
        LEFT JOIN etapa_procesal et ON et.cod_etapa = e.cod_etapa
        LEFT JOIN lugar l ON l.cod_lugar = e.cod_lugar
        LEFT JOIN especia_etapa ee
               ON ee.cod_especializacion = e.cod_especializacion
              AND ee.paso_etapa = e.paso_etapa
        WHERE e.cod_especializacion = $1
          AND e.paso_etapa = $2
          AND e.no_caso = $3
          AND e.consec_expe = $4
        "#,
    )
    .bind(&key.cod_especializacion)
    .bind(key.paso_etapa)
    .bind(key.no_caso)
    .bind(key.consec_expe)
    .fetch_optional(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Denormalized case file with its events, results and documents, read in
/// one transaction. `None` when the case file does not exist.
pub async fn detail(
    pool: &Pool<Postgres>,
    key: &CaseFileKey,
) -> Result<Option<CaseFileDetail>, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = read_detail(&mut tx, key).await;
    db::finish(tx, result).await
}

async fn read_detail(
    conn: &mut PgConnection,
    key: &CaseFileKey,
) -> Result<Option<CaseFileDetail>, AppError> {
    let Some(expediente) = fetch_view(&mut *conn, key).await? else {
        return Ok(None);
    };
    let sucesos = records::list_in::<Events>(&mut *conn, key).await?;
    let resultados = records::list_in::<Results>(&mut *conn, key).await?;
    let documentos = records::list_in::<Documents>(&mut *conn, key).await?;

    Ok(Some(CaseFileDetail {
        expediente,
        sucesos,
        resultados,
        documentos,
    }))
}

/// Open a case file at the first step of the case's stage flow.
pub async fn create(
    pool: &Pool<Postgres>,
    req: CreateCaseFileRequest,
) -> Result<CaseFile, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = insert(&mut tx, req).await;
    db::finish(tx, result).await
}

async fn insert(conn: &mut PgConnection, req: CreateCaseFileRequest) -> Result<CaseFile, AppError> {
    let case = case::lock_active(&mut *conn, req.no_caso).await?;

    let (paso_etapa, cod_etapa) = first_step(&mut *conn, &case.cod_especializacion)
        .await?
        .ok_or_else(|| {
            AppError::bad_request(format!(
                "Specialization {} has no stage flow",
                case.cod_especializacion
            ))
        })?;

    check_assignment(
        &mut *conn,
        &case.cod_especializacion,
        req.cod_lugar.as_deref(),
        req.cedula.as_deref(),
    )
    .await?;

    let consec_expe = CASE_FILE_SEQUENCE
        .next(&mut *conn, &[ScopeValue::Int(case.no_caso)])
        .await?;

    let sql = format!(
        "INSERT INTO expediente ({CASE_FILE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {CASE_FILE_COLUMNS}"
    );
    let file = sqlx::query_as::<_, CaseFile>(&sql)
        .bind(&case.cod_especializacion)
        .bind(paso_etapa)
        .bind(case.no_caso)
        .bind(consec_expe)
        .bind(cod_etapa)
        .bind(req.cod_lugar.as_deref())
        .bind(req.cedula.as_deref())
        .bind(req.fecha_etapa)
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    tracing::info!(key = %file.key(), "case file opened");
    Ok(file)
}

/// Lowest step of a specialization's stage flow and its stage code.
async fn first_step(
    conn: &mut PgConnection,
    cod_especializacion: &str,
) -> Result<Option<(i32, String)>, AppError> {
    sqlx::query_as::<_, (i32, String)>(
        "SELECT paso_etapa, cod_etapa FROM especia_etapa \
         WHERE cod_especializacion = $1 ORDER BY paso_etapa LIMIT 1",
    )
    .bind(cod_especializacion)
    .fetch_optional(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Place must exist; lawyer must practise the case file's specialization.
async fn check_assignment(
    conn: &mut PgConnection,
    cod_especializacion: &str,
    cod_lugar: Option<&str>,
    cedula: Option<&str>,
) -> Result<(), AppError> {
    if let Some(cod_lugar) = cod_lugar {
        if !reference::place_exists(&mut *conn, cod_lugar).await? {
            return Err(AppError::bad_request(format!("Unknown place: {cod_lugar}")));
        }
    }
    if let Some(cedula) = cedula {
        if !reference::lawyer_has_specialization(&mut *conn, cedula, cod_especializacion).await? {
            return Err(AppError::bad_request(format!(
                "Lawyer {cedula} is not associated with specialization {cod_especializacion}"
            )));
        }
    }
    Ok(())
}

/// Record the place, lawyer and stage date of a case file.
pub async fn update(
    pool: &Pool<Postgres>,
    key: &CaseFileKey,
    req: UpdateCaseFileRequest,
) -> Result<CaseFile, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = apply_update(&mut tx, key, req).await;
    db::finish(tx, result).await
}

async fn apply_update(
    conn: &mut PgConnection,
    key: &CaseFileKey,
    req: UpdateCaseFileRequest,
) -> Result<CaseFile, AppError> {
    let case = case::lock(&mut *conn, key.no_caso).await?;
    let existing = find_by_key(&mut *conn, key, true).await?;
    let (Some(case), Some(_)) = (case, existing) else {
        return Err(AppError::not_found(format!("Case file {key} not found")));
    };
    if case.is_closed() {
        return Err(AppError::invalid_state(format!(
            "Case {} is closed and cannot be modified",
            case.no_caso
        )));
    }

    check_assignment(
        &mut *conn,
        &key.cod_especializacion,
        req.cod_lugar.as_deref(),
        req.cedula.as_deref(),
    )
    .await?;

    let sql = format!(
        "UPDATE expediente SET cod_lugar = $5, cedula = $6, fecha_etapa = $7 \
         WHERE {KEY_PREDICATE} RETURNING {CASE_FILE_COLUMNS}"
    );
    sqlx::query_as::<_, CaseFile>(&sql)
        .bind(&key.cod_especializacion)
        .bind(key.paso_etapa)
        .bind(key.no_caso)
        .bind(key.consec_expe)
        .bind(req.cod_lugar.as_deref())
        .bind(req.cedula.as_deref())
        .bind(req.fecha_etapa)
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Lock a case file that is about to receive a child record. Fails when the
/// case file is missing or its case is closed.
pub(crate) async fn lock_writable(
    conn: &mut PgConnection,
    key: &CaseFileKey,
) -> Result<CaseFile, AppError> {
    let case = case::lock(&mut *conn, key.no_caso).await?;
    let file = find_by_key(&mut *conn, key, true).await?;
    match (case, file) {
        (Some(case), Some(_)) if case.is_closed() => Err(AppError::invalid_state(format!(
            "Case {} is closed and cannot be modified",
            case.no_caso
        ))),
        (Some(_), Some(file)) => Ok(file),
        _ => Err(AppError::not_found(format!("Case file {key} not found"))),
    }
}
