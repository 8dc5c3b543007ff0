// src/routes.rs

use axum::{
    routing::{get, patch, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route(
            "/clients",
            get(handlers::clients::get_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            put(handlers::clients::update_client).delete(handlers::clients::delete_client),
        )
        .route(
            "/orders",
            get(handlers::orders::get_orders).post(handlers::orders::create_order),
        )
        .route(
            "/orders/{id}",
            put(handlers::orders::update_order).delete(handlers::orders::delete_order),
        )
        .route("/deliveries", get(handlers::deliveries::get_deliveries))
        .route(
            "/deliveries/{id}/status",
            patch(handlers::deliveries::update_delivery_status),
        )
        .with_state(app_state)
}
