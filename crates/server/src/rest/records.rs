use axum::{extract::State, http::StatusCode, Json};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CaseDocument, CaseEvent, CaseResult, CreateDocumentRequest, CreateDocumentResponse,
    CreateEventRequest, CreateEventResponse, CreateResultRequest, CreateResultResponse,
};
use crate::error_convert::ValidateRequest;
use crate::repo::records::{self, Documents, Events, Results};
use crate::rest::case_file::{key_from_path, CaseFilePath};

// ── Events ──────────────────────────────────────────────────────────

/// POST /api/suceso/crear
#[utoipa::path(
    post,
    path = "/api/suceso/crear",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = CreateEventResponse),
        (status = 400, description = "Case is closed", body = AppError),
        (status = 404, description = "Case file not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "events"
)]
#[tracing::instrument(skip(pool))]
pub async fn create_event(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    body.validate_request()?;

    let con_suceso = records::create::<Events>(&pool, &body.expediente, &body.desc_suceso).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            success: true,
            con_suceso,
            mensaje: format!("Suceso {con_suceso} registrado"),
        }),
    ))
}

/// GET /api/suceso/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}
#[utoipa::path(
    get,
    path = "/api/suceso/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}",
    params(
        ("codEsp" = String, Path, description = "Specialization code"),
        ("pasoEtapa" = i32, Path, description = "Stage-flow step"),
        ("noCaso" = i32, Path, description = "Case number"),
        ("consecExpe" = i32, Path, description = "Case file sequence")
    ),
    responses((status = 200, description = "Events of the case file", body = Vec<CaseEvent>)),
    tag = "events"
)]
#[tracing::instrument(skip(pool, path))]
pub async fn list_events(
    State(pool): State<Pool<Postgres>>,
    path: CaseFilePath,
) -> Result<Json<Vec<CaseEvent>>, AppError> {
    let rows = records::list::<Events>(&pool, &key_from_path(path)).await?;
    Ok(Json(rows))
}

// ── Results ─────────────────────────────────────────────────────────

/// POST /api/resultado/crear
#[utoipa::path(
    post,
    path = "/api/resultado/crear",
    request_body = CreateResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = CreateResultResponse),
        (status = 400, description = "Case is closed", body = AppError),
        (status = 404, description = "Case file not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "results"
)]
#[tracing::instrument(skip(pool))]
pub async fn create_result(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateResultRequest>,
) -> Result<(StatusCode, Json<CreateResultResponse>), AppError> {
    body.validate_request()?;

    let con_resul = records::create::<Results>(&pool, &body.expediente, &body.desc_resul).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateResultResponse {
            success: true,
            con_resul,
            mensaje: format!("Resultado {con_resul} registrado"),
        }),
    ))
}

/// GET /api/resultado/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}
#[utoipa::path(
    get,
    path = "/api/resultado/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}",
    params(
        ("codEsp" = String, Path, description = "Specialization code"),
        ("pasoEtapa" = i32, Path, description = "Stage-flow step"),
        ("noCaso" = i32, Path, description = "Case number"),
        ("consecExpe" = i32, Path, description = "Case file sequence")
    ),
    responses((status = 200, description = "Results of the case file", body = Vec<CaseResult>)),
    tag = "results"
)]
#[tracing::instrument(skip(pool, path))]
pub async fn list_results(
    State(pool): State<Pool<Postgres>>,
    path: CaseFilePath,
) -> Result<Json<Vec<CaseResult>>, AppError> {
    let rows = records::list::<Results>(&pool, &key_from_path(path)).await?;
    Ok(Json(rows))
}

// ── Documents ───────────────────────────────────────────────────────

/// POST /api/documento/crear
#[utoipa::path(
    post,
    path = "/api/documento/crear",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document recorded", body = CreateDocumentResponse),
        (status = 400, description = "Case is closed", body = AppError),
        (status = 404, description = "Case file not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(pool))]
pub async fn create_document(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<CreateDocumentResponse>), AppError> {
    body.validate_request()?;

    let con_doc = records::create::<Documents>(&pool, &body.expediente, &body.ubica_doc).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse {
            success: true,
            con_doc,
            mensaje: format!("Documento {con_doc} registrado"),
        }),
    ))
}

/// GET /api/documento/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}
#[utoipa::path(
    get,
    path = "/api/documento/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}",
    params(
        ("codEsp" = String, Path, description = "Specialization code"),
        ("pasoEtapa" = i32, Path, description = "Stage-flow step"),
        ("noCaso" = i32, Path, description = "Case number"),
        ("consecExpe" = i32, Path, description = "Case file sequence")
    ),
    responses((status = 200, description = "Documents of the case file", body = Vec<CaseDocument>)),
    tag = "documents"
)]
#[tracing::instrument(skip(pool, path))]
pub async fn list_documents(
    State(pool): State<Pool<Postgres>>,
    path: CaseFilePath,
) -> Result<Json<Vec<CaseDocument>>, AppError> {
    let rows = records::list::<Documents>(&pool, &key_from_path(path)).await?;
    Ok(Json(rows))
}
