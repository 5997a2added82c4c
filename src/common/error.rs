// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro interno da aplicação. Os handlers convertem para ApiError
// (já localizado) antes de responder.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // Operação tentada sem um tenant resolvido. Nunca chega ao banco.
    #[error("Tenant ausente")]
    MissingTenant,

    #[error("Acesso negado ao tenant")]
    TenantAccessDenied,

    // Referência obsoleta: o registro já não existe no último fetch.
    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que sai pela API: status + mensagem já no idioma do pedido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl AppError {
    // Converte o erro interno em resposta localizada.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, key) = match &self {
            AppError::ValidationError(errors) => {
                // Validação devolve os detalhes por campo, não só a mensagem.
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!(
                        "{}: {}",
                        store.msg(locale, "validation"),
                        serde_json::to_string(&details).unwrap_or_default()
                    ),
                };
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "email_exists"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::MissingTenant => (StatusCode::BAD_REQUEST, "missing_tenant"),
            AppError::TenantAccessDenied => (StatusCode::FORBIDDEN, "tenant_access_denied"),
            AppError::ResourceNotFound(what) => {
                return ApiError {
                    status: StatusCode::NOT_FOUND,
                    message: format!("{} ({})", store.msg(locale, "not_found"), what),
                };
            }
            AppError::FontNotFound(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            // DatabaseError, InternalServerError, Bcrypt, JWT: viram 500 genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };

        ApiError {
            status,
            message: store.msg(locale, key).to_string(),
        }
    }
}
