// src/test_helpers.rs

use std::sync::{Arc, Mutex};

use crate::{
    common::navigation::Navigator,
    graphql::{
        transport::MockTransport, AuthLink, ErrorLink, GraphQLClient, NormalizedCache, TypePolicies,
    },
    models::auth::User,
    services::auth::AuthContext,
    storage::{MemoryStorage, TokenStorage},
};

// Guarda para onde o error link mandou o operador
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visits().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

pub fn empty_tokens() -> TokenStorage {
    TokenStorage::new(Arc::new(MemoryStorage::new()))
}

pub fn tokens_with(token: &str) -> TokenStorage {
    let tokens = empty_tokens();
    tokens.set_token(token);
    tokens
}

pub fn client_with(transport: MockTransport, tokens: TokenStorage) -> GraphQLClient {
    GraphQLClient::new(
        Arc::new(transport),
        AuthLink::new(tokens.clone()),
        ErrorLink::new(tokens, Arc::new(RecordingNavigator::default())),
        Arc::new(NormalizedCache::new(TypePolicies::console())),
    )
}

pub fn context_for(user: User) -> AuthContext {
    let context = AuthContext::new();
    context.set_user(user);
    context
}
