// src/db/order_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderDraft, OrderSummary},
};

// Pedido + nome do cliente, base das consultas de listagem
const SUMMARY_SELECT: &str = r#"
    SELECT o.*, c.name AS client_name
    FROM orders o
    INNER JOIN clients c ON c.id = o.client_id
"#;

#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_all_summaries<'e, E>(&self, executor: E) -> Result<Vec<OrderSummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{SUMMARY_SELECT} ORDER BY o.order_date DESC");
        let orders = sqlx::query_as::<_, OrderSummary>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(orders)
    }

    pub async fn find_summary_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<OrderSummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{SUMMARY_SELECT} WHERE o.id = $1");
        let order = sqlx::query_as::<_, OrderSummary>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    // O id é gerado pelo banco e volta no RETURNING, a entrega depende dele
    pub async fn insert<'e, E>(&self, executor: E, draft: &OrderDraft) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                client_id, order_date, delivery_type,
                distance_km, weight_kg, rate_per_km, rate_per_kg
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(draft.client_id)
        .bind(draft.order_date)
        .bind(&draft.delivery_type)
        .bind(draft.distance_km)
        .bind(draft.weight_kg)
        .bind(draft.rate_per_km)
        .bind(draft.rate_per_kg)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &OrderDraft,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET client_id = $2,
                order_date = $3,
                delivery_type = $4,
                distance_km = $5,
                weight_kg = $6,
                rate_per_km = $7,
                rate_per_kg = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(draft.client_id)
        .bind(draft.order_date)
        .bind(&draft.delivery_type)
        .bind(draft.distance_km)
        .bind(draft.weight_kg)
        .bind(draft.rate_per_km)
        .bind(draft.rate_per_kg)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_client<'e, E>(&self, executor: E, client_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE client_id = $1")
            .bind(client_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
