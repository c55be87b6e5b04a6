use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CaseFile, CaseFileDetail, CaseFileKey, CreateCaseFileRequest,
    CreateCaseFileResponse, MessageResponse, UpdateCaseFileRequest,
};
use crate::error_convert::ValidateRequest;

/// Path segments `{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}`.
pub type CaseFilePath = Path<(String, i32, i32, i32)>;

pub fn key_from_path(Path((cod_esp, paso_etapa, no_caso, consec_expe)): CaseFilePath) -> CaseFileKey {
    CaseFileKey::new(cod_esp, paso_etapa, no_caso, consec_expe)
}

/// GET /api/expediente/caso/{noCaso}
#[utoipa::path(
    get,
    path = "/api/expediente/caso/{noCaso}",
    params(("noCaso" = i32, Path, description = "Case number")),
    responses((status = 200, description = "Case files of the case", body = Vec<CaseFile>)),
    tag = "case-files"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_case_files(
    State(pool): State<Pool<Postgres>>,
    Path(no_caso): Path<i32>,
) -> Result<Json<Vec<CaseFile>>, AppError> {
    let files = crate::repo::case_file::list_for_case(&pool, no_caso).await?;
    Ok(Json(files))
}

/// GET /api/expediente/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}
#[utoipa::path(
    get,
    path = "/api/expediente/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}",
    params(
        ("codEsp" = String, Path, description = "Specialization code"),
        ("pasoEtapa" = i32, Path, description = "Stage-flow step"),
        ("noCaso" = i32, Path, description = "Case number"),
        ("consecExpe" = i32, Path, description = "Case file sequence")
    ),
    responses(
        (status = 200, description = "Case file with events, results and documents", body = CaseFileDetail),
        (status = 404, description = "Case file not found", body = AppError)
    ),
    tag = "case-files"
)]
#[tracing::instrument(skip(pool, path))]
pub async fn get_case_file_detail(
    State(pool): State<Pool<Postgres>>,
    path: CaseFilePath,
) -> Result<Json<CaseFileDetail>, AppError> {
    let key = key_from_path(path);
    crate::repo::case_file::detail(&pool, &key)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Case file {key} not found")))
}

/// POST /api/expediente/crear
#[utoipa::path(
    post,
    path = "/api/expediente/crear",
    request_body = CreateCaseFileRequest,
    responses(
        (status = 201, description = "Case file opened", body = CreateCaseFileResponse),
        (status = 400, description = "Case closed, no stage flow, or invalid assignment", body = AppError),
        (status = 404, description = "Case not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "case-files"
)]
#[tracing::instrument(skip(pool))]
pub async fn create_case_file(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateCaseFileRequest>,
) -> Result<(StatusCode, Json<CreateCaseFileResponse>), AppError> {
    body.validate_request()?;

    let file = crate::repo::case_file::create(&pool, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateCaseFileResponse {
            success: true,
            mensaje: format!("Expediente {} creado exitosamente", file.consec_expe),
            cod_especializacion: file.cod_especializacion,
            paso_etapa: file.paso_etapa,
            no_caso: file.no_caso,
            consec_expe: file.consec_expe,
        }),
    ))
}

/// PUT /api/expediente/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}
#[utoipa::path(
    put,
    path = "/api/expediente/{codEsp}/{pasoEtapa}/{noCaso}/{consecExpe}",
    params(
        ("codEsp" = String, Path, description = "Specialization code"),
        ("pasoEtapa" = i32, Path, description = "Stage-flow step"),
        ("noCaso" = i32, Path, description = "Case number"),
        ("consecExpe" = i32, Path, description = "Case file sequence")
    ),
    request_body = UpdateCaseFileRequest,
    responses(
        (status = 200, description = "Case file updated", body = MessageResponse),
        (status = 400, description = "Case closed or invalid assignment", body = AppError),
        (status = 404, description = "Case file not found", body = AppError)
    ),
    tag = "case-files"
)]
#[tracing::instrument(skip(pool, path))]
pub async fn update_case_file(
    State(pool): State<Pool<Postgres>>,
    path: CaseFilePath,
    Json(body): Json<UpdateCaseFileRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let key = key_from_path(path);
    let file = crate::repo::case_file::update(&pool, &key, body).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Expediente {} actualizado",
        file.consec_expe
    ))))
}
