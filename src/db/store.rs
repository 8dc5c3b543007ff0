// src/db/store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, DeliveryRepository, OrderRepository},
    models::{
        client::{Client, ClientRecord},
        delivery::{Delivery, DeliveryPricing},
        order::{Order, OrderDraft, OrderSummary, OrderWithDelivery},
    },
};

// =========================================================================
//  CONTRATOS
// =========================================================================
// Os services recebem um `Arc<dyn LogisticsStore>` montado no AppState.
// Operações "compostas" (pedido + entrega, cliente + pedidos) são atômicas:
// ou tudo grava, ou nada grava.

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, AppError>;

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError>;

    async fn find_client_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError>;

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, AppError>;

    async fn find_client_by_phone(&self, phone: &str) -> Result<Option<Client>, AppError>;

    async fn insert_client(&self, record: &ClientRecord) -> Result<Client, AppError>;

    async fn update_client(&self, id: Uuid, record: &ClientRecord) -> Result<Option<Client>, AppError>;

    /// Apaga entregas, pedidos e o cliente, nessa ordem. `false` se o cliente não existia.
    async fn delete_client_cascade(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, AppError>;

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>, AppError>;

    async fn find_order_summary(&self, id: Uuid) -> Result<Option<OrderSummary>, AppError>;

    /// Insere o pedido, pega o id gerado e insere a entrega, tudo numa transação.
    async fn insert_order_with_delivery(
        &self,
        draft: &OrderDraft,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<OrderWithDelivery, AppError>;

    /// Reescreve pedido e entrega juntos. `None` se o pedido não existe.
    async fn update_order_with_delivery(
        &self,
        id: Uuid,
        draft: &OrderDraft,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<Option<OrderWithDelivery>, AppError>;

    /// Entrega antes do pedido. `false` se o pedido não existia.
    async fn delete_order_cascade(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait DeliveryStore: Send + Sync {
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, AppError>;

    async fn find_delivery(&self, id: Uuid) -> Result<Option<Delivery>, AppError>;

    async fn find_delivery_by_order(&self, order_id: Uuid) -> Result<Option<Delivery>, AppError>;

    async fn update_delivery_status(&self, id: Uuid, status: &str) -> Result<Option<Delivery>, AppError>;
}

pub trait LogisticsStore: ClientStore + OrderStore + DeliveryStore {}

impl<T> LogisticsStore for T where T: ClientStore + OrderStore + DeliveryStore {}

// =========================================================================
//  POSTGRES
// =========================================================================

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    clients: ClientRepository,
    orders: OrderRepository,
    deliveries: DeliveryRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            clients: ClientRepository::new(),
            orders: OrderRepository::new(),
            deliveries: DeliveryRepository::new(),
        }
    }
}

// Nas operações compostas, qualquer `?` antes do commit descarta a transação,
// e o drop do `sqlx::Transaction` faz o rollback.

#[async_trait]
impl ClientStore for PgStore {
    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.clients.find_all(&self.pool).await
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        self.clients.find_by_id(&self.pool, id).await
    }

    async fn find_client_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError> {
        self.clients.find_by_cpf(&self.pool, cpf).await
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        self.clients.find_by_email(&self.pool, email).await
    }

    async fn find_client_by_phone(&self, phone: &str) -> Result<Option<Client>, AppError> {
        self.clients.find_by_phone(&self.pool, phone).await
    }

    async fn insert_client(&self, record: &ClientRecord) -> Result<Client, AppError> {
        self.clients.insert(&self.pool, record).await
    }

    async fn update_client(&self, id: Uuid, record: &ClientRecord) -> Result<Option<Client>, AppError> {
        self.clients.update(&self.pool, id, record).await
    }

    async fn delete_client_cascade(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Entregas dos pedidos do cliente
        self.deliveries.delete_by_client(&mut *tx, id).await?;
        // 2. Pedidos
        self.orders.delete_by_client(&mut *tx, id).await?;
        // 3. O cliente
        let deleted = self.clients.delete(&mut *tx, id).await?;

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, AppError> {
        self.orders.find_all_summaries(&self.pool).await
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        self.orders.find_by_id(&self.pool, id).await
    }

    async fn find_order_summary(&self, id: Uuid) -> Result<Option<OrderSummary>, AppError> {
        self.orders.find_summary_by_id(&self.pool, id).await
    }

    async fn insert_order_with_delivery(
        &self,
        draft: &OrderDraft,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<OrderWithDelivery, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Pedido (devolve o id gerado)
        let order = self.orders.insert(&mut *tx, draft).await?;
        // 2. Entrega ligada ao pedido
        let delivery = self
            .deliveries
            .insert(&mut *tx, order.id, pricing, status)
            .await?;

        tx.commit().await?;
        Ok(OrderWithDelivery { order, delivery })
    }

    async fn update_order_with_delivery(
        &self,
        id: Uuid,
        draft: &OrderDraft,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<Option<OrderWithDelivery>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(order) = self.orders.update(&mut *tx, id, draft).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let delivery = self
            .deliveries
            .update_for_order(&mut *tx, id, pricing, status)
            .await?
            .ok_or_else(|| anyhow::anyhow!("pedido {id} sem entrega associada"))?;

        tx.commit().await?;
        Ok(Some(OrderWithDelivery { order, delivery }))
    }

    async fn delete_order_cascade(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        // Filho antes do pai por causa da FK
        self.deliveries.delete_by_order(&mut *tx, id).await?;
        let deleted = self.orders.delete(&mut *tx, id).await?;

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl DeliveryStore for PgStore {
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, AppError> {
        self.deliveries.find_all(&self.pool).await
    }

    async fn find_delivery(&self, id: Uuid) -> Result<Option<Delivery>, AppError> {
        self.deliveries.find_by_id(&self.pool, id).await
    }

    async fn find_delivery_by_order(&self, order_id: Uuid) -> Result<Option<Delivery>, AppError> {
        self.deliveries.find_by_order(&self.pool, order_id).await
    }

    async fn update_delivery_status(&self, id: Uuid, status: &str) -> Result<Option<Delivery>, AppError> {
        self.deliveries.update_status(&self.pool, id, status).await
    }
}
