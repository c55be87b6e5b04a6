use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, Client, CreateClientRequest, CreateClientResponse};
use crate::error_convert::ValidateRequest;

/// GET /api/cliente/buscar/{nombre}/{apellido}
#[utoipa::path(
    get,
    path = "/api/cliente/buscar/{nombre}/{apellido}",
    params(
        ("nombre" = String, Path, description = "Name prefix (case-insensitive)"),
        ("apellido" = String, Path, description = "Surname prefix (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Matching clients", body = Vec<Client>),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(pool))]
pub async fn search_clients(
    State(pool): State<Pool<Postgres>>,
    Path((nombre, apellido)): Path<(String, String)>,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients = crate::repo::client::search(&pool, &nombre, &apellido).await?;
    Ok(Json(clients))
}

/// GET /api/cliente/{documento}
#[utoipa::path(
    get,
    path = "/api/cliente/{documento}",
    params(("documento" = String, Path, description = "Identity document number")),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 404, description = "Client not found", body = AppError)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(pool))]
pub async fn get_client_by_document(
    State(pool): State<Pool<Postgres>>,
    Path(documento): Path<String>,
) -> Result<Json<Client>, AppError> {
    crate::repo::client::find_by_document(&pool, &documento)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Client not found"))
}

/// GET /api/cliente/codigo/{codCliente}
#[utoipa::path(
    get,
    path = "/api/cliente/codigo/{codCliente}",
    params(("codCliente" = String, Path, description = "Client code")),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 404, description = "Client not found", body = AppError)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(pool))]
pub async fn get_client_by_code(
    State(pool): State<Pool<Postgres>>,
    Path(cod_cliente): Path<String>,
) -> Result<Json<Client>, AppError> {
    crate::repo::client::find_by_code(&pool, &cod_cliente)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Client {cod_cliente} not found")))
}

/// POST /api/cliente/crear
#[utoipa::path(
    post,
    path = "/api/cliente/crear",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client registered", body = CreateClientResponse),
        (status = 400, description = "Unknown document type", body = AppError),
        (status = 409, description = "Document number already registered", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(pool))]
pub async fn create_client(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<CreateClientResponse>), AppError> {
    body.validate_request()?;

    let client = crate::repo::client::create(&pool, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateClientResponse {
            success: true,
            mensaje: format!("Cliente {} creado exitosamente", client.cod_cliente),
            cod_cliente: client.cod_cliente,
        }),
    ))
}
