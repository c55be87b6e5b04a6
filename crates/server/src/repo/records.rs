//! Events, results and documents share one shape: the parent case file's
//! compound key, a sequence numbered within that case file, and one text
//! value. [`ChildTable`] describes each table; the functions here do the rest.

use shared_types::{AppError, CaseDocument, CaseEvent, CaseFileKey, CaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Pool, Postgres};

use crate::db;
use crate::error_convert::SqlxErrorExt;
use crate::repo::case_file;
use crate::repo::sequence::{ScopeValue, ScopedSequence};

const FILE_SCOPE: [&str; 4] = ["cod_especializacion", "paso_etapa", "no_caso", "consec_expe"];

pub trait ChildTable {
    const TABLE: &'static str;
    /// Human-readable name used in log lines.
    const LABEL: &'static str;
    const SEQUENCE: ScopedSequence;
    const VALUE_COLUMN: &'static str;
    type Row: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin;
}

pub struct Events;
pub struct Results;
pub struct Documents;

impl ChildTable for Events {
    const TABLE: &'static str = "suceso";
    const LABEL: &'static str = "event";
    const SEQUENCE: ScopedSequence = ScopedSequence::new("suceso", "con_suceso", &FILE_SCOPE);
    const VALUE_COLUMN: &'static str = "desc_suceso";
    type Row = CaseEvent;
}

impl ChildTable for Results {
    const TABLE: &'static str = "resultado";
    const LABEL: &'static str = "result";
    const SEQUENCE: ScopedSequence = ScopedSequence::new("resultado", "con_resul", &FILE_SCOPE);
    const VALUE_COLUMN: &'static str = "desc_resul";
    type Row = CaseResult;
}

impl ChildTable for Documents {
    const TABLE: &'static str = "documento";
    const LABEL: &'static str = "document";
    const SEQUENCE: ScopedSequence = ScopedSequence::new("documento", "con_doc", &FILE_SCOPE);
    const VALUE_COLUMN: &'static str = "ubica_doc";
    type Row = CaseDocument;
}

fn scope(key: &CaseFileKey) -> [ScopeValue<'_>; 4] {
    [
        ScopeValue::Text(&key.cod_especializacion),
        ScopeValue::Int(key.paso_etapa),
        ScopeValue::Int(key.no_caso),
        ScopeValue::Int(key.consec_expe),
    ]
}

fn list_sql<T: ChildTable>() -> String {
    format!(
        "SELECT {seq}, {value} FROM {table} \
         WHERE cod_especializacion = $1 AND paso_etapa = $2 AND no_caso = $3 AND consec_expe = $4 \
         ORDER BY {seq}",
        seq = T::SEQUENCE.column,
        value = T::VALUE_COLUMN,
        table = T::TABLE,
    )
}

fn insert_sql<T: ChildTable>() -> String {
    format!(
        "INSERT INTO {table} (cod_especializacion, paso_etapa, no_caso, consec_expe, {seq}, {value}) \
         VALUES ($1, $2, $3, $4, $5, $6)",
        table = T::TABLE,
        seq = T::SEQUENCE.column,
        value = T::VALUE_COLUMN,
    )
}

/// Child rows of one case file, by sequence. Empty when there are none or
/// the case file does not exist.
pub async fn list<T: ChildTable>(
    pool: &Pool<Postgres>,
    key: &CaseFileKey,
) -> Result<Vec<T::Row>, AppError> {
    let mut conn = pool.acquire().await.map_err(SqlxErrorExt::into_app_error)?;
    list_in::<T>(&mut conn, key).await
}

pub(crate) async fn list_in<T: ChildTable>(
    conn: &mut PgConnection,
    key: &CaseFileKey,
) -> Result<Vec<T::Row>, AppError> {
    let sql = list_sql::<T>();
    sqlx::query_as::<_, T::Row>(&sql)
        .bind(&key.cod_especializacion)
        .bind(key.paso_etapa)
        .bind(key.no_caso)
        .bind(key.consec_expe)
        .fetch_all(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Append a child row under `key` and return its sequence number.
pub async fn create<T: ChildTable>(
    pool: &Pool<Postgres>,
    key: &CaseFileKey,
    value: &str,
) -> Result<i32, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = insert::<T>(&mut tx, key, value).await;
    db::finish(tx, result).await
}

async fn insert<T: ChildTable>(
    conn: &mut PgConnection,
    key: &CaseFileKey,
    value: &str,
) -> Result<i32, AppError> {
    case_file::lock_writable(&mut *conn, key).await?;

    let next = T::SEQUENCE.next(&mut *conn, &scope(key)).await?;

    sqlx::query(&insert_sql::<T>())
        .bind(&key.cod_especializacion)
        .bind(key.paso_etapa)
        .bind(key.no_caso)
        .bind(key.consec_expe)
        .bind(next)
        .bind(value)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    tracing::info!(key = %key, seq = next, kind = T::LABEL, "case file record added");
    Ok(next)
}
