// src/handlers.rs

pub mod clients;
pub mod deliveries;
pub mod orders;

use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::common::error::AppError;

// `?id=` das rotas de leitura: presente busca um, ausente lista todos
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Identificador de 36 caracteres
    pub id: Option<String>,
}

// JSON quebrado ou com tipo errado também responde `{"error": ...}`
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        tracing::debug!(%rejection, "Corpo JSON rejeitado");
        AppError::malformed("Corpo da requisição inválido.")
    })
}
