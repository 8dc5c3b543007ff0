// src/db/memory_store.rs
//
// Store em memória usado nos testes dos services e das rotas.
// Cada operação composta trabalha numa cópia das tabelas e só troca
// o estado no "commit", então uma falha no meio não deixa nada pela metade.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{ClientStore, DeliveryStore, OrderStore},
    models::{
        client::{Client, ClientRecord},
        delivery::{Delivery, DeliveryPricing},
        order::{Order, OrderDraft, OrderSummary, OrderWithDelivery},
    },
};

#[derive(Debug, Clone, Default)]
struct Tables {
    clients: Vec<Client>,
    orders: Vec<Order>,
    deliveries: Vec<Delivery>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    // Quando ligado, a segunda escrita de toda operação composta falha
    fail_second_write: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_second_write(&self, fail: bool) {
        self.fail_second_write.store(fail, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn delivery_count(&self) -> usize {
        self.lock().deliveries.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn second_write(&self) -> Result<(), AppError> {
        if self.fail_second_write.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("conexão perdida no meio da transação".into()).into());
        }
        Ok(())
    }

    fn check_unique(tables: &Tables, record: &ClientRecord, ignore: Option<Uuid>) -> Result<(), AppError> {
        let others = tables.clients.iter().filter(|c| Some(c.id) != ignore);
        for other in others {
            if other.cpf == record.cpf {
                return Err(AppError::conflict("CPF já cadastrado!"));
            }
            if other.email == record.email {
                return Err(AppError::conflict("Email já cadastrado!"));
            }
            if other.phone == record.phone {
                return Err(AppError::conflict("Telefone já cadastrado!"));
            }
        }
        Ok(())
    }
}

fn summary(tables: &Tables, order: &Order) -> Option<OrderSummary> {
    let client = tables.clients.iter().find(|c| c.id == order.client_id)?;
    Some(OrderSummary {
        order: order.clone(),
        client_name: client.name.clone(),
    })
}

fn new_delivery(order_id: Uuid, pricing: &DeliveryPricing, status: &str) -> Delivery {
    Delivery {
        id: Uuid::new_v4(),
        order_id,
        distance_charge: pricing.distance_charge,
        weight_charge: pricing.weight_charge,
        surcharge: pricing.surcharge,
        discount: pricing.discount,
        extra_fee: pricing.extra_fee,
        final_price: pricing.final_price,
        status: status.to_string(),
    }
}

fn order_from_draft(id: Uuid, draft: &OrderDraft) -> Order {
    Order {
        id,
        client_id: draft.client_id,
        order_date: draft.order_date,
        delivery_type: draft.delivery_type.clone(),
        distance_km: draft.distance_km,
        weight_kg: draft.weight_kg,
        rate_per_km: draft.rate_per_km,
        rate_per_kg: draft.rate_per_kg,
    }
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.lock().clients.clone())
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        Ok(self.lock().clients.iter().find(|c| c.id == id).cloned())
    }

    async fn find_client_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError> {
        Ok(self.lock().clients.iter().find(|c| c.cpf == cpf).cloned())
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        Ok(self.lock().clients.iter().find(|c| c.email == email).cloned())
    }

    async fn find_client_by_phone(&self, phone: &str) -> Result<Option<Client>, AppError> {
        Ok(self.lock().clients.iter().find(|c| c.phone == phone).cloned())
    }

    async fn insert_client(&self, record: &ClientRecord) -> Result<Client, AppError> {
        let mut tables = self.lock();
        Self::check_unique(&tables, record, None)?;

        let client = Client {
            id: Uuid::new_v4(),
            name: record.name.clone(),
            cpf: record.cpf.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            address: record.address.clone(),
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn update_client(&self, id: Uuid, record: &ClientRecord) -> Result<Option<Client>, AppError> {
        let mut tables = self.lock();
        Self::check_unique(&tables, record, Some(id))?;

        let Some(client) = tables.clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        client.name = record.name.clone();
        client.cpf = record.cpf.clone();
        client.phone = record.phone.clone();
        client.email = record.email.clone();
        client.address = record.address.clone();
        Ok(Some(client.clone()))
    }

    async fn delete_client_cascade(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let mut tx = tables.clone();

        let order_ids: Vec<Uuid> = tx
            .orders
            .iter()
            .filter(|o| o.client_id == id)
            .map(|o| o.id)
            .collect();
        tx.deliveries.retain(|d| !order_ids.contains(&d.order_id));

        self.second_write()?;
        tx.orders.retain(|o| o.client_id != id);

        let before = tx.clients.len();
        tx.clients.retain(|c| c.id != id);
        if tx.clients.len() == before {
            return Ok(false);
        }

        *tables = tx;
        Ok(true)
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, AppError> {
        let tables = self.lock();
        Ok(tables.orders.iter().filter_map(|o| summary(&tables, o)).collect())
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.lock().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_order_summary(&self, id: Uuid) -> Result<Option<OrderSummary>, AppError> {
        let tables = self.lock();
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| summary(&tables, o)))
    }

    async fn insert_order_with_delivery(
        &self,
        draft: &OrderDraft,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<OrderWithDelivery, AppError> {
        let mut tables = self.lock();
        let mut tx = tables.clone();

        if !tx.clients.iter().any(|c| c.id == draft.client_id) {
            // Mesma coisa que a FK faria no Postgres
            return Err(sqlx::Error::RowNotFound.into());
        }

        let order = order_from_draft(Uuid::new_v4(), draft);
        tx.orders.push(order.clone());

        self.second_write()?;
        let delivery = new_delivery(order.id, pricing, status);
        tx.deliveries.push(delivery.clone());

        *tables = tx;
        Ok(OrderWithDelivery { order, delivery })
    }

    async fn update_order_with_delivery(
        &self,
        id: Uuid,
        draft: &OrderDraft,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<Option<OrderWithDelivery>, AppError> {
        let mut tables = self.lock();
        let mut tx = tables.clone();

        let Some(order) = tx.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        *order = order_from_draft(id, draft);
        let order = order.clone();

        self.second_write()?;
        let delivery = tx
            .deliveries
            .iter_mut()
            .find(|d| d.order_id == id)
            .ok_or_else(|| anyhow::anyhow!("pedido {id} sem entrega associada"))?;
        *delivery = Delivery {
            id: delivery.id,
            ..new_delivery(id, pricing, status)
        };
        let delivery = delivery.clone();

        *tables = tx;
        Ok(Some(OrderWithDelivery { order, delivery }))
    }

    async fn delete_order_cascade(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let mut tx = tables.clone();

        tx.deliveries.retain(|d| d.order_id != id);

        self.second_write()?;
        let before = tx.orders.len();
        tx.orders.retain(|o| o.id != id);
        if tx.orders.len() == before {
            return Ok(false);
        }

        *tables = tx;
        Ok(true)
    }
}

#[async_trait]
impl DeliveryStore for InMemoryStore {
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, AppError> {
        Ok(self.lock().deliveries.clone())
    }

    async fn find_delivery(&self, id: Uuid) -> Result<Option<Delivery>, AppError> {
        Ok(self.lock().deliveries.iter().find(|d| d.id == id).cloned())
    }

    async fn find_delivery_by_order(&self, order_id: Uuid) -> Result<Option<Delivery>, AppError> {
        Ok(self
            .lock()
            .deliveries
            .iter()
            .find(|d| d.order_id == order_id)
            .cloned())
    }

    async fn update_delivery_status(&self, id: Uuid, status: &str) -> Result<Option<Delivery>, AppError> {
        let mut tables = self.lock();
        let Some(delivery) = tables.deliveries.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        delivery.status = status.to_string();
        Ok(Some(delivery.clone()))
    }
}
