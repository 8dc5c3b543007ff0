// src/handlers/clients.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{json_body, IdQuery},
    models::client::{Client, ClientPayload},
};

// GET /clients  |  GET /clients?id=
#[utoipa::path(
    get,
    path = "/clients",
    tag = "Clients",
    params(IdQuery),
    responses(
        (status = 200, description = "Lista de clientes, ou um cliente quando `id` é informado", body = Vec<Client>),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_clients(
    State(app_state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let response = match query.id {
        Some(id) => Json(app_state.client_service.get_client(&id).await?).into_response(),
        None => Json(app_state.client_service.list_clients().await?).into_response(),
    };
    Ok(response)
}

// POST /clients
#[utoipa::path(
    post,
    path = "/clients",
    tag = "Clients",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Client),
        (status = 400, description = "Campos ausentes ou inválidos"),
        (status = 409, description = "CPF, e-mail ou telefone já cadastrado")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    body: Result<Json<ClientPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = json_body(body)?;
    let client = app_state.client_service.create_client(payload).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /clients/{id}
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "Clients",
    request_body = ClientPayload,
    params(("id" = String, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente atualizado (campos omitidos são mantidos)", body = Client),
        (status = 400, description = "ID ou campos inválidos"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "CPF, e-mail ou telefone já pertence a outro cliente")
    )
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ClientPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = json_body(body)?;
    let client = app_state.client_service.update_client(&id, payload).await?;

    Ok(Json(client))
}

// DELETE /clients/{id}
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = String, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido com seus pedidos e entregas"),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete_client(&id).await?;

    Ok(Json(json!({ "message": "Cliente removido com sucesso!" })))
}
