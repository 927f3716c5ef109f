// src/graphql/links.rs

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{
    common::navigation::{LOGIN_PATH, Navigator},
    graphql::{GraphQLResponse, NetworkError},
    storage::TokenStorage,
};

// ---
// Estágio 1: anexa o bearer token quando existe
// ---
#[derive(Clone)]
pub struct AuthLink {
    tokens: TokenStorage,
}

impl AuthLink {
    pub fn new(tokens: TokenStorage) -> Self {
        Self { tokens }
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(token) = self.tokens.get_token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                // Segue sem autenticação; o servidor decide o que fazer
                Err(_) => tracing::warn!("Token armazenado não cabe num header HTTP; ignorado."),
            }
        }

        headers
    }
}

// ---
// Estágio 3: inspeciona a troca já concluída
// ---
#[derive(Clone)]
pub struct ErrorLink {
    tokens: TokenStorage,
    navigator: Arc<dyn Navigator>,
}

impl ErrorLink {
    pub fn new(tokens: TokenStorage, navigator: Arc<dyn Navigator>) -> Self {
        Self { tokens, navigator }
    }

    pub fn inspect(&self, operation: &str, outcome: &Result<GraphQLResponse, NetworkError>) {
        match outcome {
            Ok(response) => {
                for error in response.errors() {
                    tracing::error!(
                        "[GraphQL error] {}: Message: {}, Code: {:?}, Location: {:?}, Path: {:?}",
                        operation,
                        error.message,
                        error.code(),
                        error.locations,
                        error.path
                    );
                }
            }
            Err(error) => {
                tracing::error!("[Network error] {}: {}", operation, error);

                // Único gatilho automático de encerramento de sessão
                if error.is_unauthorized() {
                    self.end_session();
                }
            }
        }
    }

    /// Remove o token e manda o operador para o login. Idempotente.
    pub fn end_session(&self) {
        self.tokens.remove_token();
        self.navigator.navigate(LOGIN_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graphql::GraphQLError,
        test_helpers::{empty_tokens, tokens_with, RecordingNavigator},
    };

    #[test]
    fn auth_link_attaches_bearer_header() {
        let link = AuthLink::new(tokens_with("abc.def"));
        let headers = link.headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc.def");
    }

    #[test]
    fn auth_link_forwards_unauthenticated_without_token() {
        let link = AuthLink::new(empty_tokens());
        assert!(link.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn unauthorized_network_error_tears_down_session() {
        let tokens = tokens_with("expirado");
        let navigator = Arc::new(RecordingNavigator::default());
        let link = ErrorLink::new(tokens.clone(), navigator.clone());

        let outcome = Err(NetworkError::Status { status: 401, body: String::new() });
        link.inspect("Me", &outcome);
        assert!(!tokens.has_token());

        // Segunda passada: mesmo estado final
        link.inspect("Me", &outcome);
        assert!(!tokens.has_token());

        let visits = navigator.visits();
        assert!(visits.iter().all(|path| path == LOGIN_PATH));
        assert!(!visits.is_empty());
    }

    #[test]
    fn other_failures_keep_the_session() {
        let tokens = tokens_with("valido");
        let navigator = Arc::new(RecordingNavigator::default());
        let link = ErrorLink::new(tokens.clone(), navigator.clone());

        link.inspect("Me", &Err(NetworkError::Status { status: 500, body: "boom".into() }));
        link.inspect(
            "AssignCompanyToSegment",
            &Ok(GraphQLResponse {
                data: None,
                errors: Some(vec![GraphQLError::new("Segmento inválido")]),
            }),
        );

        assert!(tokens.has_token());
        assert!(navigator.visits().is_empty());
    }
}
