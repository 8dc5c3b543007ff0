// src/handlers/deliveries.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{json_body, IdQuery},
    models::delivery::{Delivery, DeliveryStatusPayload},
};

// GET /deliveries  |  GET /deliveries?id=
#[utoipa::path(
    get,
    path = "/deliveries",
    tag = "Deliveries",
    params(IdQuery),
    responses(
        (status = 200, description = "Lista de entregas, ou uma entrega quando `id` é informado", body = Vec<Delivery>),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Entrega não encontrada")
    )
)]
pub async fn get_deliveries(
    State(app_state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let response = match query.id {
        Some(id) => Json(app_state.delivery_service.get_delivery(&id).await?).into_response(),
        None => Json(app_state.delivery_service.list_deliveries().await?).into_response(),
    };
    Ok(response)
}

// PATCH /deliveries/{id}/status
#[utoipa::path(
    patch,
    path = "/deliveries/{id}/status",
    tag = "Deliveries",
    request_body = DeliveryStatusPayload,
    params(("id" = String, Path, description = "ID da entrega")),
    responses(
        (status = 200, description = "Status alterado; valores do frete intactos", body = Delivery),
        (status = 400, description = "ID ou status inválido"),
        (status = 404, description = "Entrega não encontrada")
    )
)]
pub async fn update_delivery_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DeliveryStatusPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = json_body(body)?;
    let delivery = app_state.delivery_service.update_status(&id, payload).await?;

    Ok(Json(delivery))
}
