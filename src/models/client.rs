// src/models/client.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Representa um cliente vindo do banco de dados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[schema(example = "12345678901")]
    pub cpf: String,
    #[schema(example = "11987654321")]
    pub phone: String,
    #[schema(example = "maria@exemplo.com")]
    pub email: String,
    #[schema(example = "Rua das Flores, 100 - São Paulo")]
    pub address: String,
}

// Dados completos de um cliente antes de ir para o banco (insert ou update)
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

// Corpo de POST /clients e PUT /clients/{id}.
// Todos os campos são opcionais aqui: no cadastro a presença é checada à parte,
// na atualização o que não vier mantém o valor salvo.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[validate(
        length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."),
        custom(function = "validate_not_blank", message = "O nome não pode ficar em branco.")
    )]
    #[schema(example = "Maria Souza")]
    pub name: Option<String>,

    #[validate(custom(function = "validate_cpf", message = "O CPF deve conter exatamente 11 dígitos."))]
    #[schema(example = "12345678901")]
    pub cpf: Option<String>,

    #[validate(
        length(min = 1, max = 20, message = "O telefone deve ter entre 1 e 20 caracteres."),
        custom(function = "validate_not_blank", message = "O telefone não pode ficar em branco.")
    )]
    #[schema(example = "11987654321")]
    pub phone: Option<String>,

    #[validate(
        email(message = "O e-mail fornecido é inválido."),
        length(max = 100, message = "O e-mail deve ter no máximo 100 caracteres.")
    )]
    #[schema(example = "maria@exemplo.com")]
    pub email: Option<String>,

    #[validate(
        length(min = 1, max = 300, message = "O endereço deve ter entre 1 e 300 caracteres."),
        custom(function = "validate_not_blank", message = "O endereço não pode ficar em branco.")
    )]
    #[schema(example = "Rua das Flores, 100 - São Paulo")]
    pub address: Option<String>,
}

impl ClientPayload {
    /// Cadastro exige todos os campos presentes e não vazios.
    pub fn to_record(&self) -> Option<ClientRecord> {
        fn filled(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
        }

        Some(ClientRecord {
            name: filled(&self.name)?,
            cpf: filled(&self.cpf)?,
            phone: filled(&self.phone)?,
            email: filled(&self.email)?,
            address: filled(&self.address)?,
        })
    }

    /// Aplica o patch sobre o cliente salvo: campo ausente mantém o valor atual.
    pub fn merge_into(self, current: &Client) -> ClientRecord {
        ClientRecord {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            cpf: self.cpf.unwrap_or_else(|| current.cpf.clone()),
            phone: self.phone.unwrap_or_else(|| current.phone.clone()),
            email: self.email.unwrap_or_else(|| current.email.clone()),
            address: self.address.unwrap_or_else(|| current.address.clone()),
        }
    }
}

// Só espaços conta como vazio, tanto no cadastro quanto na atualização
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_cpf"))
    }
}
