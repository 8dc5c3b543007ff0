use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Entrada malformada: id com tamanho errado, número inválido, data inválida,
    // campo obrigatório ausente. Rejeitada antes de qualquer acesso ao banco.
    #[error("{0}")]
    MalformedInput(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // CPF / e-mail / telefone já cadastrados
    #[error("{0}")]
    DuplicateConflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AppError::MalformedInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::DuplicateConflict(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MalformedInput(message) => (StatusCode::BAD_REQUEST, message),
            AppError::DuplicateConflict(message) => (StatusCode::CONFLICT, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),

            // Banco e erros inesperados viram 500. A causa vai pro log, nunca pro cliente.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
