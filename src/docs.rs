// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Logística API", description = "Clientes, pedidos e entregas com cálculo de frete"),
    paths(
        // --- Clients ---
        handlers::clients::get_clients,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Orders ---
        handlers::orders::get_orders,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,

        // --- Deliveries ---
        handlers::deliveries::get_deliveries,
        handlers::deliveries::update_delivery_status,
    ),
    components(
        schemas(
            // --- Clients ---
            models::client::Client,
            models::client::ClientPayload,

            // --- Orders ---
            models::order::Order,
            models::order::OrderSummary,
            models::order::OrderPayload,
            models::order::OrderWithDelivery,

            // --- Deliveries ---
            models::delivery::Delivery,
            models::delivery::DeliveryPricing,
            models::delivery::DeliveryStatusPayload,
        )
    ),
    tags(
        (name = "Clients", description = "Cadastro de Clientes"),
        (name = "Orders", description = "Pedidos e cálculo do frete"),
        (name = "Deliveries", description = "Consulta e status das entregas")
    )
)]
pub struct ApiDoc;
