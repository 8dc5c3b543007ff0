use crate::common::error::AppError;

// Converte violação de UNIQUE do Postgres em conflito amigável.
// O nome da constraint diz qual campo colidiu.
pub(crate) fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some("clients_cpf_key") => "CPF já cadastrado!",
                Some("clients_email_key") => "Email já cadastrado!",
                Some("clients_phone_key") => "Telefone já cadastrado!",
                _ => "Registro duplicado.",
            };
            return AppError::conflict(message);
        }
    }
    e.into()
}
