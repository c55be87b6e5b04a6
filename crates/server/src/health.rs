use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use std::time::Instant;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Mark the moment the service began accepting work. Later calls are no-ops.
pub fn mark_started() {
    STARTED_AT.get_or_init(Instant::now);
}

/// Whole seconds since [`mark_started`]; zero if it was never called.
fn uptime_seconds() -> u64 {
    STARTED_AT.get().map_or(0, |t| t.elapsed().as_secs())
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` once the router answers.
    pub status: String,
    /// `connected`, or `error: ...` with the driver message.
    pub db: String,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    fn with_db(db: String) -> Self {
        Self {
            status: "ok".to_string(),
            db,
            uptime_seconds: uptime_seconds(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Round-trip a trivial query through the pool.
async fn database_status(pool: &Pool<Postgres>) -> String {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the database");
            format!("error: {e}")
        }
    }
}

/// Report service liveness. The case database being unreachable does not
/// fail the check; it shows up in `db`.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Case service is running", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<Pool<Postgres>>) -> Json<HealthResponse> {
    Json(HealthResponse::with_db(database_status(&pool).await))
}
