use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres, Transaction};
use std::str::FromStr;

use crate::config::{ConfigError, ServiceConfig};
use crate::error_convert::SqlxErrorExt;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}

/// Create the connection pool described by `config`.
///
/// Uses `connect_lazy_with` so no connection opens until the first query.
/// Every connection carries the configured `statement_timeout`.
pub fn create_pool(config: &ServiceConfig) -> Result<Pool<Postgres>, ConfigError> {
    let statement_timeout = config.statement_timeout.as_millis().to_string();
    let options = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", statement_timeout.as_str())]);

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(options))
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Open a transaction on a pooled connection.
pub async fn begin(pool: &Pool<Postgres>) -> Result<Transaction<'static, Postgres>, AppError> {
    pool.begin().await.map_err(SqlxErrorExt::into_app_error)
}

/// Close out a transaction according to the operation's outcome: commit on
/// `Ok`, roll back on `Err`. The original error wins over a rollback failure.
pub async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
