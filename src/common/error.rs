use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::middleware::i18n::Locale;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cargo não encontrado")]
    RoleNotFound,

    // Erros traduzidos a partir do banco (ver translate_db_error)
    #[error("Violação de unicidade (constraint: {0:?})")]
    UniqueConstraintViolation(Option<String>),

    #[error("Registro alvo da escrita não encontrado")]
    RecordNotFound,

    #[error("Violação de chave estrangeira (constraint: {0:?})")]
    ForeignKeyViolation(Option<String>),

    #[error("Dados inválidos: {0}")]
    InvalidData(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

// Erros conhecidos do banco viram variantes específicas; o resto segue
// intacto como DatabaseError.
pub fn translate_db_error(err: sqlx::Error) -> AppError {
    if matches!(err, sqlx::Error::RowNotFound) {
        return AppError::RecordNotFound;
    }

    if let Some(db_err) = err.as_database_error() {
        let constraint = db_err.constraint().map(str::to_owned);
        match db_err.kind() {
            ErrorKind::UniqueViolation => return AppError::UniqueConstraintViolation(constraint),
            ErrorKind::ForeignKeyViolation => return AppError::ForeignKeyViolation(constraint),
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return AppError::InvalidData(db_err.message().to_string());
            }
            _ => {}
        }
    }

    AppError::DatabaseError(err)
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RoleNotFound | AppError::RecordNotFound => StatusCode::NOT_FOUND,
            AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::ForeignKeyViolation(_) | AppError::InvalidData(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation.failed",
            AppError::RoleNotFound => "role.not_found",
            AppError::UniqueConstraintViolation(_) => "role.name_taken",
            AppError::RecordNotFound => "record.not_found",
            AppError::ForeignKeyViolation(_) => "record.referenced",
            AppError::InvalidData(_) => "data.invalid",
            AppError::DatabaseError(_) => "internal",
        }
    }

    // Converte para a resposta HTTP no idioma do cliente
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let status = self.status_code();
        let message = locale.translate(self.message_key()).to_string();

        let details = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            e if status.is_server_error() => {
                // O detalhe fica só no log, nunca vai para o cliente.
                tracing::error!("Erro Interno do Servidor: {}", e);
                None
            }
            _ => None,
        };

        ApiError {
            status,
            message,
            details,
        }
    }
}

// O erro já pronto para virar resposta
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::DatabaseError;
    use std::borrow::Cow;
    use std::fmt;
    use validator::Validate;

    // Erro de banco falso para exercitar o tradutor sem Postgres
    #[derive(Debug)]
    struct FakeDbError {
        kind: ErrorKind,
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fake database error {}", self.code)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind, code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError {
            kind,
            code,
            constraint,
        }))
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err = translate_db_error(db_error(
            ErrorKind::UniqueViolation,
            "23505",
            Some("roles_name_key"),
        ));
        assert!(matches!(
            &err,
            AppError::UniqueConstraintViolation(Some(c)) if c == "roles_name_key"
        ));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn foreign_key_violation_becomes_bad_request() {
        let err = translate_db_error(db_error(ErrorKind::ForeignKeyViolation, "23503", None));
        assert!(matches!(err, AppError::ForeignKeyViolation(None)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_null_violation_becomes_invalid_data() {
        let err = translate_db_error(db_error(ErrorKind::NotNullViolation, "23502", None));
        assert!(matches!(err, AppError::InvalidData(_)));
    }

    #[test]
    fn missing_row_on_write_becomes_not_found() {
        let err = translate_db_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::RecordNotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_errors_are_passed_through() {
        let err = translate_db_error(db_error(ErrorKind::Other, "40001", None));
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::Database(_))));

        let err = translate_db_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::PoolTimedOut)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_is_localized() {
        let pt = Locale("pt".into());
        let api = AppError::RoleNotFound.to_api_error(&pt);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Cargo não encontrado.");
        assert!(api.details.is_none());

        let api = AppError::DatabaseError(sqlx::Error::PoolTimedOut).to_api_error(&Locale::default());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "An unexpected error occurred.");
        assert!(api.details.is_none());
    }

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let errors = Named { name: String::new() }.validate().unwrap_err();
        let api = AppError::from(errors).to_api_error(&Locale::default());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details, Some(json!({ "name": ["required"] })));
    }
}
