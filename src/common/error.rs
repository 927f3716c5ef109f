use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    common::navigation::LOGIN_PATH,
    graphql::ClientError,
};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Erros de formulário: resolvidos antes de qualquer chamada de rede
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Sessão ausente ou expirada")]
    Unauthenticated,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    // Tudo o que volta do pipeline GraphQL (erros de negócio e de rede)
    #[error(transparent)]
    Client(#[from] ClientError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do console")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn forbidden(action: &str) -> Self {
        AppError::Forbidden(format!("você não tem permissão para {}.", action))
    }

    pub fn ends_session(&self) -> bool {
        match self {
            AppError::Unauthenticated => true,
            AppError::Client(ClientError::Network(e)) => e.is_unauthorized(),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.ends_session() {
            return Redirect::to(LOGIN_PATH).into_response();
        }

        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
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

            // Erros de regra de negócio do servidor: exibidos no formulário
            AppError::Client(ClientError::GraphQL(errors)) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                let body = Json(json!({
                    "error": "O servidor recusou a operação.",
                    "details": messages,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),

            AppError::Client(ref e) => {
                tracing::error!("Falha ao falar com o servidor GraphQL: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "O servidor GraphQL não respondeu como esperado.".to_string(),
                )
            }

            ref e => {
                tracing::error!("Erro Interno do Console: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
