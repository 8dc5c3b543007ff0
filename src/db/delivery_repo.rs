// src/db/delivery_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::delivery::{Delivery, DeliveryPricing},
};

#[derive(Clone, Default)]
pub struct DeliveryRepository;

impl DeliveryRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_all<'e, E>(&self, executor: E) -> Result<Vec<Delivery>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deliveries = sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries")
            .fetch_all(executor)
            .await?;
        Ok(deliveries)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Delivery>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let delivery = sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(delivery)
    }

    pub async fn find_by_order<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Option<Delivery>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let delivery = sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(executor)
            .await?;
        Ok(delivery)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<Delivery, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let delivery = sqlx::query_as::<_, Delivery>(
            r#"
            INSERT INTO deliveries (
                order_id, distance_charge, weight_charge, surcharge,
                discount, extra_fee, final_price, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(pricing.distance_charge)
        .bind(pricing.weight_charge)
        .bind(pricing.surcharge)
        .bind(pricing.discount)
        .bind(pricing.extra_fee)
        .bind(pricing.final_price)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(delivery)
    }

    // Reescreve preço e status da entrega do pedido
    pub async fn update_for_order<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        pricing: &DeliveryPricing,
        status: &str,
    ) -> Result<Option<Delivery>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let delivery = sqlx::query_as::<_, Delivery>(
            r#"
            UPDATE deliveries
            SET distance_charge = $2,
                weight_charge = $3,
                surcharge = $4,
                discount = $5,
                extra_fee = $6,
                final_price = $7,
                status = $8
            WHERE order_id = $1
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(pricing.distance_charge)
        .bind(pricing.weight_charge)
        .bind(pricing.surcharge)
        .bind(pricing.discount)
        .bind(pricing.extra_fee)
        .bind(pricing.final_price)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(delivery)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Delivery>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let delivery = sqlx::query_as::<_, Delivery>(
            "UPDATE deliveries SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(delivery)
    }

    pub async fn delete_by_order<'e, E>(&self, executor: E, order_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM deliveries WHERE order_id = $1")
            .bind(order_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM deliveries
            WHERE order_id IN (SELECT id FROM orders WHERE client_id = $1)
            "#,
        )
        .bind(client_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
