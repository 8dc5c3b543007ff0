// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{LogisticsStore, PgStore},
    services::{
        client_service::ClientService, delivery_service::DeliveryService,
        order_service::OrderService,
    },
};

// Configuração lida do ambiente (.env é opcional)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let db_max_connections = var_or("DB_MAX_CONNECTIONS", 5)?;
        let acquire_secs = var_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?;

        Ok(Self {
            database_url,
            server_addr,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
        })
    }
}

fn var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} com valor inválido: {raw}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client_service: ClientService,
    pub order_service: OrderService,
    pub delivery_service: DeliveryService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::from_store(Arc::new(PgStore::new(db_pool))))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_store(store: Arc<dyn LogisticsStore>) -> Self {
        Self {
            client_service: ClientService::new(store.clone()),
            order_service: OrderService::new(store.clone()),
            delivery_service: DeliveryService::new(store),
        }
    }
}
