// src/graphql/error.rs

use thiserror::Error;

use crate::graphql::GraphQLError;

// Falha no nível de transporte (HTTP)
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("servidor GraphQL respondeu com status {status}")]
    Status { status: u16, body: String },

    #[error("falha de transporte: {0}")]
    Request(#[from] reqwest::Error),
}

impl NetworkError {
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            NetworkError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// O resultado "etiquetado" de uma operação: ou os dados, ou isto.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("resposta inesperada do servidor: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("a operação {0} não devolveu dados")]
    MissingData(&'static str),
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
