// src/models/delivery.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Status gravado em toda entrega recém-precificada.
pub const STATUS_CALCULATED: &str = "calculado";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub order_id: Uuid,
    #[schema(example = "300.00")]
    pub distance_charge: Decimal,
    #[schema(example = "120.00")]
    pub weight_charge: Decimal,
    #[schema(example = "84.00")]
    pub surcharge: Decimal,
    #[schema(example = "51.90")]
    pub discount: Decimal,
    #[schema(example = "15.00")]
    pub extra_fee: Decimal,
    #[schema(example = "467.10")]
    pub final_price: Decimal,
    #[schema(example = "calculado")]
    pub status: String,
}

// Resultado do motor de preço (tudo com 2 casas decimais)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPricing {
    pub distance_charge: Decimal,
    pub weight_charge: Decimal,
    pub surcharge: Decimal,
    pub extra_fee: Decimal,
    pub discount: Decimal,
    pub final_price: Decimal,
}

// PATCH /deliveries/{id}/status
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatusPayload {
    #[validate(length(min = 1, max = 20, message = "O status deve ter entre 1 e 20 caracteres."))]
    #[schema(example = "em rota")]
    pub status: Option<String>,
}
