// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::delivery::Delivery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub order_date: DateTime<Utc>,
    #[schema(example = "urgente")]
    pub delivery_type: String,
    #[schema(example = "100.00")]
    pub distance_km: Decimal,
    #[schema(example = "60.00")]
    pub weight_kg: Decimal,
    #[schema(example = "3.00")]
    pub rate_per_km: Decimal,
    #[schema(example = "2.00")]
    pub rate_per_kg: Decimal,
}

// Pedido + nome do cliente (listagem com JOIN)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub order: Order,
    #[schema(example = "Maria Souza")]
    pub client_name: String,
}

/// Campos de um pedido já validados, prontos para precificar e gravar.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub client_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub delivery_type: String,
    pub distance_km: Decimal,
    pub weight_kg: Decimal,
    pub rate_per_km: Decimal,
    pub rate_per_kg: Decimal,
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            client_id: order.client_id,
            order_date: order.order_date,
            delivery_type: order.delivery_type.clone(),
            distance_km: order.distance_km,
            weight_kg: order.weight_kg,
            rate_per_km: order.rate_per_km,
            rate_per_kg: order.rate_per_kg,
        }
    }
}

/// Atualização parcial de um pedido. `None` = campo não enviado, mantém o salvo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub client_id: Option<Uuid>,
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_type: Option<String>,
    pub distance_km: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub rate_per_km: Option<Decimal>,
    pub rate_per_kg: Option<Decimal>,
    pub status: Option<String>,
}

impl OrderPatch {
    /// Junta o pedido salvo (e o status atual da entrega) com o patch.
    pub fn merge(self, current: &Order, current_status: &str) -> (OrderDraft, String) {
        let draft = OrderDraft {
            client_id: self.client_id.unwrap_or(current.client_id),
            order_date: self.order_date.unwrap_or(current.order_date),
            delivery_type: self.delivery_type.unwrap_or_else(|| current.delivery_type.clone()),
            distance_km: self.distance_km.unwrap_or(current.distance_km),
            weight_kg: self.weight_kg.unwrap_or(current.weight_kg),
            rate_per_km: self.rate_per_km.unwrap_or(current.rate_per_km),
            rate_per_kg: self.rate_per_kg.unwrap_or(current.rate_per_kg),
        };
        let status = self.status.unwrap_or_else(|| current_status.to_string());

        (draft, status)
    }
}

// Corpo de POST /orders e PUT /orders/{id}.
// Os campos chegam crus (JSON) porque números podem vir como string
// e a validação precisa distinguir "ausente" de "inválido".
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[schema(value_type = Option<String>, example = "550e8400-e29b-41d4-a716-446655440000")]
    pub client_id: Option<Value>,
    #[schema(value_type = Option<String>, example = "2025-03-10T14:00:00Z")]
    pub order_date: Option<Value>,
    #[schema(value_type = Option<String>, example = "urgente")]
    pub delivery_type: Option<Value>,
    #[schema(value_type = Option<f64>, example = 100)]
    pub distance_km: Option<Value>,
    #[schema(value_type = Option<f64>, example = 60)]
    pub weight_kg: Option<Value>,
    #[schema(value_type = Option<f64>, example = 3)]
    pub rate_per_km: Option<Value>,
    #[schema(value_type = Option<f64>, example = 2)]
    pub rate_per_kg: Option<Value>,
    // Só considerado na atualização
    #[schema(value_type = Option<String>, example = "em rota")]
    pub status: Option<Value>,
}

// Resultado de criação/atualização: o pedido e sua entrega precificada
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDelivery {
    pub order: Order,
    pub delivery: Delivery,
}
