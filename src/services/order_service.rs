// src/services/order_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{DeliveryStore, LogisticsStore, OrderStore},
    models::{
        delivery::STATUS_CALCULATED,
        order::{OrderPayload, OrderSummary, OrderWithDelivery},
    },
    services::{
        pricing::{calculate_delivery_price, PricingInput},
        validation::{self, parse_identifier},
    },
};

// Orquestra pedido + entrega: valida, precifica e grava os dois juntos.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn LogisticsStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn LogisticsStore>) -> Self {
        Self { store }
    }

    // --- LEITURA ---

    pub async fn list_orders(&self) -> Result<Vec<OrderSummary>, AppError> {
        self.store.list_orders().await
    }

    pub async fn get_order(&self, raw_id: &str) -> Result<OrderSummary, AppError> {
        let id = parse_identifier(raw_id, "ID do pedido inválido!")?;

        self.store
            .find_order_summary(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pedido não encontrado!"))
    }

    // --- CADASTRO ---

    pub async fn create_order(&self, payload: &OrderPayload) -> Result<OrderWithDelivery, AppError> {
        // 1. Validação (para no primeiro erro, consulta o cliente no fim)
        let draft = validation::validate_order_creation(&*self.store, payload).await?;

        // 2. Preço (e tem que caber nas colunas)
        let pricing = calculate_delivery_price(PricingInput::from(&draft));
        validation::ensure_price_fits(&pricing)?;

        // 3. Pedido + entrega na mesma transação
        let created = self
            .store
            .insert_order_with_delivery(&draft, &pricing, STATUS_CALCULATED)
            .await?;

        tracing::info!(
            order_id = %created.order.id,
            delivery_id = %created.delivery.id,
            final_price = %created.delivery.final_price,
            "Pedido cadastrado"
        );
        Ok(created)
    }

    // --- ATUALIZAÇÃO ---
    // Sempre recalcula o preço e reescreve a entrega junto com o pedido.

    pub async fn update_order(
        &self,
        raw_id: &str,
        payload: &OrderPayload,
    ) -> Result<OrderWithDelivery, AppError> {
        let id = parse_identifier(raw_id, "ID do pedido inválido!")?;
        let patch = validation::validate_order_patch(payload)?;

        let current = self
            .store
            .find_order(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pedido não encontrado!"))?;

        if let Some(client_id) = patch.client_id {
            validation::ensure_client_exists(&*self.store, client_id).await?;
        }

        let current_delivery = self
            .store
            .find_delivery_by_order(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("pedido {id} sem entrega associada"))?;

        let (draft, status) = patch.merge(&current, &current_delivery.status);
        let pricing = calculate_delivery_price(PricingInput::from(&draft));
        validation::ensure_price_fits(&pricing)?;

        let updated = self
            .store
            .update_order_with_delivery(id, &draft, &pricing, &status)
            .await?
            // Apagado entre a leitura e a escrita
            .ok_or_else(|| AppError::not_found("Pedido não encontrado!"))?;

        tracing::info!(
            order_id = %id,
            final_price = %updated.delivery.final_price,
            "Pedido e entrega atualizados"
        );
        Ok(updated)
    }

    // --- REMOÇÃO ---

    pub async fn delete_order(&self, raw_id: &str) -> Result<(), AppError> {
        let id = parse_identifier(raw_id, "ID do pedido inválido!")?;

        if self.store.find_order(id).await?.is_none() {
            return Err(AppError::not_found("Pedido não encontrado!"));
        }

        if !self.store.delete_order_cascade(id).await? {
            return Err(AppError::not_found("Pedido não encontrado!"));
        }

        tracing::info!(order_id = %id, "Pedido e entrega removidos");
        Ok(())
    }
}
