// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::lead::LeadStatus;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Lead {0} não encontrado")]
    LeadNotFound(Uuid),

    #[error("Lead {0} já existe")]
    DuplicateLeadId(Uuid),

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: LeadStatus, to: LeadStatus },

    #[error("Provedor de CRM desconhecido: {0}")]
    UnknownProvider(String),

    #[error("Chave de API do CRM é obrigatória")]
    ApiKeyRequired,

    #[error("Nenhum CRM conectado")]
    CrmNotConnected,

    #[error("Versão de armazenamento não suportada: {0}")]
    UnsupportedStoreVersion(u32),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
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
            AppError::LeadNotFound(id) => {
                // Política: não é fatal, só avisamos
                tracing::warn!("Lead {} não encontrado", id);
                (StatusCode::NOT_FOUND, "Lead não encontrado.".to_string())
            }
            AppError::DuplicateLeadId(id) => (
                StatusCode::CONFLICT,
                format!("Já existe um lead com o id {}.", id),
            ),
            AppError::InvalidTransition { from, to } => {
                let body = Json(json!({
                    "error": format!("Não é possível mudar o status de '{}' para '{}'.", from, to),
                    "from": from,
                    "to": to,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::UnknownProvider(ref id) => (
                StatusCode::NOT_FOUND,
                format!("Provedor de CRM '{}' não existe.", id),
            ),
            AppError::ApiKeyRequired => (
                StatusCode::BAD_REQUEST,
                "Informe a chave de API do CRM para conectar.".to_string(),
            ),
            AppError::CrmNotConnected => (
                StatusCode::CONFLICT,
                "Nenhum CRM conectado.".to_string(),
            ),

            // Todos os outros erros viram 500; o detalhe fica só no log.
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

// Helper para montar um erro de validação de um campo só
pub(crate) fn field_error(
    errors: &mut validator::ValidationErrors,
    field: &'static str,
    code: &'static str,
) {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(code.into());
    errors.add(field, err);
}
