use shared_types::{client_code, AppError, Client, CreateClientRequest};
use sqlx::{PgConnection, Pool, Postgres};

use crate::db;
use crate::error_convert::SqlxErrorExt;

const CLIENT_COLUMNS: &str = "cod_cliente, id_tipo_doc, nom_cliente, apell_cliente, n_documento";

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive prefix search on name and surname, ordered by surname
/// then name.
pub async fn search(
    pool: &Pool<Postgres>,
    nombre: &str,
    apellido: &str,
) -> Result<Vec<Client>, AppError> {
    let sql = format!(
        "SELECT {CLIENT_COLUMNS} FROM cliente \
         WHERE nom_cliente ILIKE $1 ESCAPE '\\' AND apell_cliente ILIKE $2 ESCAPE '\\' \
         ORDER BY apell_cliente, nom_cliente"
    );
    sqlx::query_as::<_, Client>(&sql)
        .bind(format!("{}%", escape_like(nombre.trim())))
        .bind(format!("{}%", escape_like(apellido.trim())))
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Find a client by identity document number.
pub async fn find_by_document(
    pool: &Pool<Postgres>,
    n_documento: &str,
) -> Result<Option<Client>, AppError> {
    let sql = format!("SELECT {CLIENT_COLUMNS} FROM cliente WHERE n_documento = $1");
    sqlx::query_as::<_, Client>(&sql)
        .bind(n_documento)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Find a client by its generated code.
pub async fn find_by_code(
    pool: &Pool<Postgres>,
    cod_cliente: &str,
) -> Result<Option<Client>, AppError> {
    let sql = format!("SELECT {CLIENT_COLUMNS} FROM cliente WHERE cod_cliente = $1");
    sqlx::query_as::<_, Client>(&sql)
        .bind(cod_cliente)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub(crate) async fn exists(conn: &mut PgConnection, cod_cliente: &str) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cliente WHERE cod_cliente = $1)")
        .bind(cod_cliente)
        .fetch_one(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Register a client under the next code from `cliente_codigo_seq`.
/// Fields are stored as submitted, so lookups by those values round-trip.
pub async fn create(pool: &Pool<Postgres>, req: CreateClientRequest) -> Result<Client, AppError> {
    let mut tx = db::begin(pool).await?;
    let result = insert(&mut tx, req).await;
    db::finish(tx, result).await
}

async fn insert(conn: &mut PgConnection, req: CreateClientRequest) -> Result<Client, AppError> {
    let doc_type_known = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM tipo_documento WHERE id_tipo_doc = $1)",
    )
    .bind(&req.id_tipo_doc)
    .fetch_one(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    if !doc_type_known {
        return Err(AppError::bad_request(format!(
            "Unknown document type: {}",
            req.id_tipo_doc
        )));
    }

    let n: i64 = sqlx::query_scalar("SELECT nextval('cliente_codigo_seq')")
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    let sql = format!(
        "INSERT INTO cliente ({CLIENT_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {CLIENT_COLUMNS}"
    );
    sqlx::query_as::<_, Client>(&sql)
        .bind(client_code(n))
        .bind(&req.id_tipo_doc)
        .bind(&req.nom_cliente)
        .bind(&req.apell_cliente)
        .bind(&req.n_documento)
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
