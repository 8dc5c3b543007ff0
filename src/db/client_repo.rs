// src/db/client_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::client::{Client, ClientRecord},
};

// Repositório da tabela 'clients'.
// Recebe o executor de fora: pool para leituras soltas, transação para operações compostas.
#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_all<'e, E>(&self, executor: E) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    // Busca por um dos campos únicos (cpf, email, phone).
    // `column` nunca vem do usuário, só das constantes abaixo.
    async fn find_by_unique<'e, E>(
        &self,
        executor: E,
        column: &'static str,
        value: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT * FROM clients WHERE {column} = $1");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(value)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    pub async fn find_by_cpf<'e, E>(&self, executor: E, cpf: &str) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find_by_unique(executor, "cpf", cpf).await
    }

    pub async fn find_by_email<'e, E>(&self, executor: E, email: &str) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find_by_unique(executor, "email", email).await
    }

    pub async fn find_by_phone<'e, E>(&self, executor: E, phone: &str) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find_by_unique(executor, "phone", phone).await
    }

    pub async fn insert<'e, E>(&self, executor: E, record: &ClientRecord) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, cpf, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&record.name)
        .bind(&record.cpf)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(&record.address)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        record: &ClientRecord,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $2, cpf = $3, phone = $4, email = $5, address = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&record.name)
        .bind(&record.cpf)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(&record.address)
        .fetch_optional(executor)
        .await
        .map_err(map_unique_violation)
    }

    /// Retorna quantas linhas foram apagadas (0 ou 1).
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
