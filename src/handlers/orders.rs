// src/handlers/orders.rs

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
    models::order::{OrderPayload, OrderSummary, OrderWithDelivery},
};

// GET /orders  |  GET /orders?id=
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(IdQuery),
    responses(
        (status = 200, description = "Pedidos com o nome do cliente, ou um pedido quando `id` é informado", body = Vec<OrderSummary>),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_orders(
    State(app_state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let response = match query.id {
        Some(id) => Json(app_state.order_service.get_order(&id).await?).into_response(),
        None => Json(app_state.order_service.list_orders().await?).into_response(),
    };
    Ok(response)
}

// POST /orders
// Valida, calcula o frete e grava pedido + entrega juntos.
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Pedido cadastrado com a entrega precificada", body = OrderWithDelivery),
        (status = 400, description = "Campos ausentes ou inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    body: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = json_body(body)?;
    let created = app_state.order_service.create_order(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Pedido cadastrado com sucesso!",
            "order": created.order,
            "delivery": created.delivery,
        })),
    ))
}

// PUT /orders/{id}
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Orders",
    request_body = OrderPayload,
    params(("id" = String, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido atualizado e entrega recalculada", body = OrderWithDelivery),
        (status = 400, description = "ID ou campos inválidos"),
        (status = 404, description = "Pedido ou cliente não encontrado")
    )
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = json_body(body)?;
    let updated = app_state.order_service.update_order(&id, &payload).await?;

    Ok(Json(updated))
}

// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido e entrega removidos"),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete_order(&id).await?;

    Ok(Json(json!({ "message": "Pedido removido com sucesso!" })))
}
