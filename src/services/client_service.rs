// src/services/client_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ClientStore, LogisticsStore},
    models::client::{Client, ClientPayload},
    services::validation::parse_identifier,
};

#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn LogisticsStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn LogisticsStore>) -> Self {
        Self { store }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.store.list_clients().await
    }

    pub async fn get_client(&self, raw_id: &str) -> Result<Client, AppError> {
        let id = parse_identifier(raw_id, "ID do cliente inválido.")?;

        self.store
            .find_client(id)
            .await?
            .ok_or_else(|| AppError::not_found("Cliente não encontrado."))
    }

    pub async fn create_client(&self, payload: ClientPayload) -> Result<Client, AppError> {
        // Presença primeiro, formato depois
        let record = payload
            .to_record()
            .ok_or_else(|| AppError::malformed("Campos obrigatórios não preenchidos!"))?;
        payload.validate()?;

        // Duplicidade: CPF, depois e-mail, depois telefone
        if self.store.find_client_by_cpf(&record.cpf).await?.is_some() {
            return Err(AppError::conflict("CPF já cadastrado!"));
        }
        if self.store.find_client_by_email(&record.email).await?.is_some() {
            return Err(AppError::conflict("Email já cadastrado!"));
        }
        if self.store.find_client_by_phone(&record.phone).await?.is_some() {
            return Err(AppError::conflict("Telefone já cadastrado!"));
        }

        // Corrida entre a checagem e o insert cai na UNIQUE do banco (409 também)
        let client = self.store.insert_client(&record).await?;

        tracing::info!(client_id = %client.id, "Cliente cadastrado");
        Ok(client)
    }

    pub async fn update_client(&self, raw_id: &str, payload: ClientPayload) -> Result<Client, AppError> {
        let id = parse_identifier(raw_id, "ID do cliente inválido.")?;
        payload.validate()?;

        let current = self
            .store
            .find_client(id)
            .await?
            .ok_or_else(|| AppError::not_found("Cliente não encontrado!"))?;

        let record = payload.merge_into(&current);

        let updated = self
            .store
            .update_client(id, &record)
            .await?
            .ok_or_else(|| AppError::not_found("Cliente não encontrado!"))?;

        tracing::info!(client_id = %id, "Cliente atualizado");
        Ok(updated)
    }

    /// Remove o cliente com todos os pedidos e entregas dele.
    pub async fn delete_client(&self, raw_id: &str) -> Result<(), AppError> {
        let id = parse_identifier(raw_id, "ID do cliente inválido.")?;

        if self.store.find_client(id).await?.is_none() {
            return Err(AppError::not_found("Cliente não encontrado!"));
        }

        if !self.store.delete_client_cascade(id).await? {
            return Err(AppError::not_found("Cliente não encontrado!"));
        }

        tracing::info!(client_id = %id, "Cliente removido junto com pedidos e entregas");
        Ok(())
    }
}
