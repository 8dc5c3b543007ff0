// src/services/delivery_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{DeliveryStore, LogisticsStore},
    models::delivery::{Delivery, DeliveryStatusPayload},
    services::validation::parse_identifier,
};

// Entregas nascem e morrem junto com o pedido; aqui só leitura e troca de status.
#[derive(Clone)]
pub struct DeliveryService {
    store: Arc<dyn LogisticsStore>,
}

impl DeliveryService {
    pub fn new(store: Arc<dyn LogisticsStore>) -> Self {
        Self { store }
    }

    pub async fn list_deliveries(&self) -> Result<Vec<Delivery>, AppError> {
        self.store.list_deliveries().await
    }

    pub async fn get_delivery(&self, raw_id: &str) -> Result<Delivery, AppError> {
        let id = parse_identifier(raw_id, "ID da entrega inválido.")?;

        self.store
            .find_delivery(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entrega não encontrada."))
    }

    /// Troca apenas o status; os valores do preço ficam como estão.
    pub async fn update_status(
        &self,
        raw_id: &str,
        payload: DeliveryStatusPayload,
    ) -> Result<Delivery, AppError> {
        let id = parse_identifier(raw_id, "ID da entrega inválido.")?;

        let status = payload
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::malformed("Status da entrega inválido"))?
            .to_owned();
        payload.validate()?;

        let updated = self
            .store
            .update_delivery_status(id, &status)
            .await?
            .ok_or_else(|| AppError::not_found("Entrega não encontrada."))?;

        tracing::info!(delivery_id = %id, status = %updated.status, "Status da entrega atualizado");
        Ok(updated)
    }
}
