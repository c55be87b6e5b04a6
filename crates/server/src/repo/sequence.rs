//! Scoped `max + 1` key allocation.
//!
//! Case numbers, case-file sequences and the per-case-file event, result and
//! document sequences are all "one more than the largest existing value among
//! rows sharing my parent key". [`ScopedSequence`] captures that once.
//!
//! Allocation happens inside the caller's transaction. A transaction-scoped
//! advisory lock keyed on the table and scope values is taken first, so two
//! concurrent allocations for the same parent serialize until the first
//! transaction commits or rolls back and the second then sees its row.

use shared_types::AppError;
use sqlx::PgConnection;

use crate::error_convert::SqlxErrorExt;

/// A value bound to one scope column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeValue<'a> {
    Text(&'a str),
    Int(i32),
}

impl std::fmt::Display for ScopeValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeValue::Text(s) => f.write_str(s),
            ScopeValue::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Sequence column `column` of `table`, numbered independently within each
/// distinct combination of `scope_columns`.
#[derive(Debug, Clone, Copy)]
pub struct ScopedSequence {
    pub table: &'static str,
    pub column: &'static str,
    pub scope_columns: &'static [&'static str],
}

impl ScopedSequence {
    pub const fn new(
        table: &'static str,
        column: &'static str,
        scope_columns: &'static [&'static str],
    ) -> Self {
        Self {
            table,
            column,
            scope_columns,
        }
    }

    /// `SELECT COALESCE(MAX(column), 0) + 1 FROM table [WHERE a = $1 AND ...]`
    pub fn next_value_sql(&self) -> String {
        let mut sql = format!(
            "SELECT COALESCE(MAX({}), 0) + 1 FROM {}",
            self.column, self.table
        );
        for (i, col) in self.scope_columns.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!("{col} = ${}", i + 1));
        }
        sql
    }

    /// Advisory lock name for one scope. Hashed by Postgres into the lock key.
    pub fn lock_name(&self, scope: &[ScopeValue<'_>]) -> String {
        let mut name = format!("{}.{}", self.table, self.column);
        for value in scope {
            name.push(':');
            name.push_str(&value.to_string());
        }
        name
    }

    /// Lock the scope and return the next free value in it.
    ///
    /// `conn` must be inside a transaction; the lock is held until it ends.
    pub async fn next(
        &self,
        conn: &mut PgConnection,
        scope: &[ScopeValue<'_>],
    ) -> Result<i32, AppError> {
        if scope.len() != self.scope_columns.len() {
            return Err(AppError::internal(format!(
                "sequence {}.{} expects {} scope values, got {}",
                self.table,
                self.column,
                self.scope_columns.len(),
                scope.len()
            )));
        }

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1)::bigint)")
            .bind(self.lock_name(scope))
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        let sql = self.next_value_sql();
        let mut query = sqlx::query_scalar::<_, i32>(&sql);
        for value in scope {
            query = match *value {
                ScopeValue::Text(s) => query.bind(s),
                ScopeValue::Int(n) => query.bind(n),
            };
        }

        let next = query
            .fetch_one(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        tracing::debug!(table = self.table, column = self.column, next, "allocated sequence value");
        Ok(next)
    }
}
