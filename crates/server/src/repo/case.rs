use shared_types::{AppError, Case, CreateCaseRequest, UpdateCaseRequest};
use sqlx::{PgConnection, Pool, Postgres};

use crate::db;
use crate::error_convert::SqlxErrorExt;
use crate::repo::sequence::ScopedSequence;

/// Case numbers are global.
pub const CASE_NUMBER: ScopedSequence = ScopedSequence::new("caso", "no_caso", &[]);

const CASE_COLUMNS: &str =
    "no_caso, cod_cliente, cod_especializacion, fecha_inicio, fecha_fin, valor";

/// Find a case by number.
pub async fn find_by_number(pool: &Pool<Postgres>, no_caso: i32) -> Result<Option<Case>, AppError> {
    let sql = format!("SELECT {CASE_COLUMNS} FROM caso WHERE no_caso = $1");
    sqlx::query_as::<_, Case>(&sql)
        .bind(no_caso)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Highest-numbered active case of a client, if any.
pub async fn latest_active_for_client(
    pool: &Pool<Postgres>,
    cod_cliente: &str,
) -> Result<Option<Case>, AppError> {
    let sql = format!(
        "SELECT {CASE_COLUMNS} FROM caso \
         WHERE cod_cliente = $1 AND fecha_fin IS NULL \
         ORDER BY no_caso DESC LIMIT 1"
    );
    sqlx::query_as::<_, Case>(&sql)
        .bind(cod_cliente)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Active cases of a client, newest first.
pub async fn list_active_for_client(
    pool: &Pool<Postgres>,
    cod_cliente: &str,
) -> Result<Vec<Case>, AppError> {
    let sql = format!(
        "SELECT {CASE_COLUMNS} FROM caso \
         WHERE cod_cliente = $1 AND fecha_fin IS NULL \
         ORDER BY no_caso DESC"
    );
    sqlx::query_as::<_, Case>(&sql)
        .bind(cod_cliente)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Every case of a client, open or closed, newest first.
pub async fn list_for_client(
    pool: &Pool<Postgres>,
    cod_cliente: &str,
) -> Result<Vec<Case>, AppError> {
    let sql = format!(
        "SELECT {CASE_COLUMNS} FROM caso WHERE cod_cliente = $1 ORDER BY no_caso DESC"
    );
    sqlx::query_as::<_, Case>(&sql)
        .bind(cod_cliente)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Lock a case row for the rest of the transaction.
pub(crate) async fn lock(conn: &mut PgConnection, no_caso: i32) -> Result<Option<Case>, AppError> {
    let sql = format!("SELECT {CASE_COLUMNS} FROM caso WHERE no_caso = $1 FOR UPDATE");
    sqlx::query_as::<_, Case>(&sql)
        .bind(no_caso)
        .fetch_optional(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Lock a case that is about to receive a write and make sure it is open.
pub(crate) async fn lock_active(conn: &mut PgConnection, no_caso: i32) -> Result<Case, AppError> {
    let case = lock(conn, no_caso)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {no_caso} not found")))?;
    if case.is_closed() {
        return Err(AppError::invalid_state(format!(
            "Case {no_caso} is closed and cannot be modified"
        )));
    }
    Ok(case)
}

pub(crate) async fn specialization_exists(
    conn: &mut PgConnection,
    cod_especializacion: &str,
) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM especializacion WHERE cod_especializacion = $1)",
    )
    .bind(cod_especializacion)
    .fetch_one(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Open a new active case and return its number.
pub async fn create(pool: &Pool<Postgres>, req: CreateCaseRequest) -> Result<i32, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = insert(&mut tx, req).await;
    db::finish(tx, result).await
}

async fn insert(conn: &mut PgConnection, req: CreateCaseRequest) -> Result<i32, AppError> {
    if !crate::repo::client::exists(&mut *conn, &req.cod_cliente).await? {
        return Err(AppError::not_found(format!(
            "Client {} not found",
            req.cod_cliente
        )));
    }
    if !specialization_exists(&mut *conn, &req.cod_especializacion).await? {
        return Err(AppError::not_found(format!(
            "Specialization {} not found",
            req.cod_especializacion
        )));
    }

    let no_caso = CASE_NUMBER.next(&mut *conn, &[]).await?;

    sqlx::query(
        "INSERT INTO caso (no_caso, cod_cliente, cod_especializacion, fecha_inicio, fecha_fin, valor) \
         VALUES ($1, $2, $3, $4, NULL, $5)",
    )
    .bind(no_caso)
    .bind(&req.cod_cliente)
    .bind(&req.cod_especializacion)
    .bind(req.fecha_inicio)
    .bind(req.valor)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    tracing::info!(no_caso, cod_cliente = %req.cod_cliente, "case opened");
    Ok(no_caso)
}

/// Update an active case. Supplying `fecha_fin` closes it.
pub async fn update(
    pool: &Pool<Postgres>,
    no_caso: i32,
    req: UpdateCaseRequest,
) -> Result<Case, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = apply_update(&mut tx, no_caso, req).await;
    db::finish(tx, result).await
}

async fn apply_update(
    conn: &mut PgConnection,
    no_caso: i32,
    req: UpdateCaseRequest,
) -> Result<Case, AppError> {
    lock_active(&mut *conn, no_caso).await?;

    if let Some(fecha_fin) = req.fecha_fin {
        if fecha_fin < req.fecha_inicio {
            return Err(AppError::bad_request(
                "End date cannot be earlier than the start date",
            ));
        }
    }
    if !specialization_exists(&mut *conn, &req.cod_especializacion).await? {
        return Err(AppError::not_found(format!(
            "Specialization {} not found",
            req.cod_especializacion
        )));
    }

    let sql = format!(
        "UPDATE caso SET fecha_inicio = $2, valor = $3, cod_especializacion = $4, fecha_fin = $5 \
         WHERE no_caso = $1 RETURNING {CASE_COLUMNS}"
    );
    let case = sqlx::query_as::<_, Case>(&sql)
        .bind(no_caso)
        .bind(req.fecha_inicio)
        .bind(req.valor)
        .bind(&req.cod_especializacion)
        .bind(req.fecha_fin)
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    if case.is_closed() {
        tracing::info!(no_caso, "case closed");
    }
    Ok(case)
}
