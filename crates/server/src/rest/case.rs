use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, Case, CreateCaseRequest, CreateCaseResponse, MessageResponse, UpdateCaseRequest,
};
use crate::error_convert::ValidateRequest;

/// GET /api/caso/ultimo/{codCliente}
#[utoipa::path(
    get,
    path = "/api/caso/ultimo/{codCliente}",
    params(("codCliente" = String, Path, description = "Client code")),
    responses(
        (status = 200, description = "Latest active case, or null", body = Option<Case>)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool))]
pub async fn latest_active_case(
    State(pool): State<Pool<Postgres>>,
    Path(cod_cliente): Path<String>,
) -> Result<Json<Option<Case>>, AppError> {
    let case = crate::repo::case::latest_active_for_client(&pool, &cod_cliente).await?;
    Ok(Json(case))
}

/// GET /api/caso/activos/{codCliente}
#[utoipa::path(
    get,
    path = "/api/caso/activos/{codCliente}",
    params(("codCliente" = String, Path, description = "Client code")),
    responses((status = 200, description = "Active cases, newest first", body = Vec<Case>)),
    tag = "cases"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_active_cases(
    State(pool): State<Pool<Postgres>>,
    Path(cod_cliente): Path<String>,
) -> Result<Json<Vec<Case>>, AppError> {
    let cases = crate::repo::case::list_active_for_client(&pool, &cod_cliente).await?;
    Ok(Json(cases))
}

/// GET /api/caso/cliente/{codCliente}
#[utoipa::path(
    get,
    path = "/api/caso/cliente/{codCliente}",
    params(("codCliente" = String, Path, description = "Client code")),
    responses((status = 200, description = "All cases of the client, newest first", body = Vec<Case>)),
    tag = "cases"
)]
#[tracing::instrument(skip(pool))]
pub async fn list_client_cases(
    State(pool): State<Pool<Postgres>>,
    Path(cod_cliente): Path<String>,
) -> Result<Json<Vec<Case>>, AppError> {
    let cases = crate::repo::case::list_for_client(&pool, &cod_cliente).await?;
    Ok(Json(cases))
}

/// POST /api/caso/crear
#[utoipa::path(
    post,
    path = "/api/caso/crear",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Case opened", body = CreateCaseResponse),
        (status = 404, description = "Client or specialization not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool))]
pub async fn create_case(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CreateCaseResponse>), AppError> {
    body.validate_request()?;

    let no_caso = crate::repo::case::create(&pool, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateCaseResponse {
            success: true,
            no_caso,
            mensaje: format!("Caso {no_caso} creado exitosamente"),
        }),
    ))
}

/// GET /api/caso/{noCaso}
#[utoipa::path(
    get,
    path = "/api/caso/{noCaso}",
    params(("noCaso" = i32, Path, description = "Case number")),
    responses(
        (status = 200, description = "Case found", body = Case),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool))]
pub async fn get_case(
    State(pool): State<Pool<Postgres>>,
    Path(no_caso): Path<i32>,
) -> Result<Json<Case>, AppError> {
    crate::repo::case::find_by_number(&pool, no_caso)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Case {no_caso} not found")))
}

/// PUT /api/caso/{noCaso}
#[utoipa::path(
    put,
    path = "/api/caso/{noCaso}",
    params(("noCaso" = i32, Path, description = "Case number")),
    request_body = UpdateCaseRequest,
    responses(
        (status = 200, description = "Case updated", body = MessageResponse),
        (status = 400, description = "Case is closed or dates are inconsistent", body = AppError),
        (status = 404, description = "Case not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool))]
pub async fn update_case(
    State(pool): State<Pool<Postgres>>,
    Path(no_caso): Path<i32>,
    Json(body): Json<UpdateCaseRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate_request()?;

    let case = crate::repo::case::update(&pool, no_caso, body).await?;
    let mensaje = if case.is_closed() {
        format!("Caso {no_caso} cerrado")
    } else {
        format!("Caso {no_caso} actualizado")
    };
    Ok(Json(MessageResponse::ok(mensaje)))
}
