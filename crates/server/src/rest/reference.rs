use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, DocumentType, Lawyer, Place, Specialization, Stage, StageFlowStep};
use crate::repo::reference;

// ── Specializations & stage flow ────────────────────────────────────

/// GET /api/especializacion/
#[utoipa::path(
    get,
    path = "/api/especializacion/",
    responses((status = 200, description = "Specializations by name", body = Vec<Specialization>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_specializations(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<Specialization>>, AppError> {
    Ok(Json(reference::list_specializations(&pool).await?))
}

/// GET /api/etapa
#[utoipa::path(
    get,
    path = "/api/etapa",
    responses((status = 200, description = "Procedural stages", body = Vec<Stage>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_stages(State(pool): State<Pool<Postgres>>) -> Result<Json<Vec<Stage>>, AppError> {
    Ok(Json(reference::list_stages(&pool).await?))
}

/// GET /api/especia-etapa/{codEspecializacion}
#[utoipa::path(
    get,
    path = "/api/especia-etapa/{codEspecializacion}",
    params(("codEspecializacion" = String, Path, description = "Specialization code")),
    responses((status = 200, description = "Stage flow in step order", body = Vec<StageFlowStep>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_stage_flow(
    State(pool): State<Pool<Postgres>>,
    Path(cod_especializacion): Path<String>,
) -> Result<Json<Vec<StageFlowStep>>, AppError> {
    Ok(Json(reference::list_stage_flow(&pool, &cod_especializacion).await?))
}

/// GET /api/especia-etapa/{codEspecializacion}/{pasoEtapa}
#[utoipa::path(
    get,
    path = "/api/especia-etapa/{codEspecializacion}/{pasoEtapa}",
    params(
        ("codEspecializacion" = String, Path, description = "Specialization code"),
        ("pasoEtapa" = i32, Path, description = "Step number")
    ),
    responses(
        (status = 200, description = "Stage-flow step", body = StageFlowStep),
        (status = 404, description = "Step not found", body = AppError)
    ),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn get_stage_flow_step(
    State(pool): State<Pool<Postgres>>,
    Path((cod_especializacion, paso_etapa)): Path<(String, i32)>,
) -> Result<Json<StageFlowStep>, AppError> {
    reference::find_stage_flow_step(&pool, &cod_especializacion, paso_etapa)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Step {paso_etapa} not found for specialization {cod_especializacion}"
            ))
        })
}

// ── Lawyers ─────────────────────────────────────────────────────────

/// GET /api/abogado/especializacion/{codEspecializacion}
#[utoipa::path(
    get,
    path = "/api/abogado/especializacion/{codEspecializacion}",
    params(("codEspecializacion" = String, Path, description = "Specialization code")),
    responses((status = 200, description = "Lawyers by surname, name", body = Vec<Lawyer>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_lawyers_by_specialization(
    State(pool): State<Pool<Postgres>>,
    Path(cod_especializacion): Path<String>,
) -> Result<Json<Vec<Lawyer>>, AppError> {
    Ok(Json(
        reference::list_lawyers_by_specialization(&pool, &cod_especializacion).await?,
    ))
}

/// GET /api/abogado/{cedula}
#[utoipa::path(
    get,
    path = "/api/abogado/{cedula}",
    params(("cedula" = String, Path, description = "Lawyer identity number")),
    responses(
        (status = 200, description = "Lawyer found", body = Lawyer),
        (status = 404, description = "Lawyer not found", body = AppError)
    ),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn get_lawyer(
    State(pool): State<Pool<Postgres>>,
    Path(cedula): Path<String>,
) -> Result<Json<Lawyer>, AppError> {
    reference::find_lawyer(&pool, &cedula)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Lawyer {cedula} not found")))
}

// ── Places ──────────────────────────────────────────────────────────

/// GET /api/lugar/ciudades
#[utoipa::path(
    get,
    path = "/api/lugar/ciudades",
    responses((status = 200, description = "Cities by name", body = Vec<Place>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_cities(State(pool): State<Pool<Postgres>>) -> Result<Json<Vec<Place>>, AppError> {
    Ok(Json(reference::list_cities(&pool).await?))
}

/// GET /api/lugar/entidades/{codCiudad}
#[utoipa::path(
    get,
    path = "/api/lugar/entidades/{codCiudad}",
    params(("codCiudad" = String, Path, description = "City place code")),
    responses((status = 200, description = "Entities located in the city", body = Vec<Place>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_entities_by_city(
    State(pool): State<Pool<Postgres>>,
    Path(cod_ciudad): Path<String>,
) -> Result<Json<Vec<Place>>, AppError> {
    Ok(Json(reference::list_entities_by_city(&pool, &cod_ciudad).await?))
}

/// GET /api/lugar/{codLugar}
#[utoipa::path(
    get,
    path = "/api/lugar/{codLugar}",
    params(("codLugar" = String, Path, description = "Place code")),
    responses(
        (status = 200, description = "Place found", body = Place),
        (status = 404, description = "Place not found", body = AppError)
    ),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn get_place(
    State(pool): State<Pool<Postgres>>,
    Path(cod_lugar): Path<String>,
) -> Result<Json<Place>, AppError> {
    reference::find_place(&pool, &cod_lugar)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Place {cod_lugar} not found")))
}

// ── Document types ──────────────────────────────────────────────────

/// GET /api/tipo-documento
#[utoipa::path(
    get,
    path = "/api/tipo-documento",
    responses((status = 200, description = "Identity document types", body = Vec<DocumentType>)),
    tag = "reference"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_document_types(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<DocumentType>>, AppError> {
    Ok(Json(reference::list_document_types(&pool).await?))
}
