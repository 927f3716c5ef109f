// src/services/auth.rs

use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    graphql::{operations, ClientError, FetchPolicy, GraphQLClient},
    models::auth::{AuthPayload, LoginUserPayload, RegisterUserPayload, User},
    storage::TokenStorage,
};

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
    loading: bool,
}

/// Estado de autenticação do console (usuário atual + flag de carregamento).
///
/// Criado na inicialização e entregue explicitamente a quem precisa; o
/// logout o limpa.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<AuthState>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).loading
    }

    pub fn set_user(&self, user: User) {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        state.user = Some(user);
        state.loading = false;
    }

    fn set_loading(&self, loading: bool) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).loading = loading;
    }

    pub fn clear(&self) {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        state.user = None;
        state.loading = false;
    }

    /// O usuário atual, ou `Unauthenticated` se a sessão não foi carregada.
    pub fn require_user(&self) -> Result<User, AppError> {
        self.current_user().ok_or(AppError::Unauthenticated)
    }
}

#[derive(Deserialize)]
struct LoginData {
    login: AuthPayload,
}

#[derive(Deserialize)]
struct RegisterData {
    register: AuthPayload,
}

#[derive(Deserialize)]
struct MeData {
    me: Option<User>,
}

#[derive(Clone)]
pub struct AuthService {
    client: GraphQLClient,
    tokens: TokenStorage,
    context: AuthContext,
}

impl AuthService {
    pub fn new(client: GraphQLClient, tokens: TokenStorage, context: AuthContext) -> Self {
        Self { client, tokens, context }
    }

    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    pub fn has_session(&self) -> bool {
        self.tokens.has_token()
    }

    pub async fn login(&self, payload: &LoginUserPayload) -> Result<User, AppError> {
        payload.validate()?;

        let data: LoginData = self
            .client
            .mutate(
                &operations::LOGIN,
                json!({ "email": payload.email, "password": payload.password }),
                &[],
            )
            .await?;

        Ok(self.start_session(data.login))
    }

    pub async fn register(&self, payload: &RegisterUserPayload) -> Result<User, AppError> {
        payload.validate()?;

        let data: RegisterData = self
            .client
            .mutate(&operations::REGISTER, json!({ "input": payload }), &[])
            .await?;

        Ok(self.start_session(data.register))
    }

    fn start_session(&self, auth: AuthPayload) -> User {
        // Resquícios de uma sessão anterior não podem vazar para a nova
        self.client.cache().reset();
        self.tokens.set_token(&auth.token);
        self.context.set_user(auth.user.clone());

        tracing::info!("✅ Sessão iniciada para {}", auth.user.display_name());
        auth.user
    }

    pub fn logout(&self) {
        self.tokens.remove_token();
        self.client.cache().reset();
        self.context.clear();
        tracing::info!("Sessão encerrada.");
    }

    /// Busca `me` no servidor e popula o contexto.
    pub async fn load_current_user(&self) -> Result<Option<User>, AppError> {
        if !self.tokens.has_token() {
            self.context.clear();
            return Ok(None);
        }

        self.context.set_loading(true);
        let result: Result<MeData, ClientError> = self
            .client
            .query(&operations::ME, json!({}), FetchPolicy::NetworkOnly)
            .await;

        match result {
            Ok(MeData { me: Some(user) }) => {
                self.context.set_user(user.clone());
                Ok(Some(user))
            }
            Ok(MeData { me: None }) => {
                self.context.clear();
                Ok(None)
            }
            Err(e) => {
                self.context.set_loading(false);
                if matches!(&e, ClientError::Network(network) if network.is_unauthorized()) {
                    self.context.clear();
                }
                Err(e.into())
            }
        }
    }

    /// Usuário do contexto; carrega do servidor só quando ainda não há um.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        match self.context.current_user() {
            Some(user) if self.tokens.has_token() => Ok(Some(user)),
            _ => self.load_current_user().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::{
        graphql::{transport::MockTransport, GraphQLResponse, NetworkError},
        test_helpers::{client_with, empty_tokens, tokens_with},
    };

    fn user_json(id: i64) -> serde_json::Value {
        json!({
            "__typename": "User", "id": id, "email": "ana@marketplace.com",
            "isVerified": true, "isActive": true, "placeId": 7,
            "userRoles": [{ "__typename": "UserRole", "id": 1, "isActive": true,
                            "role": { "__typename": "Role", "id": 3, "name": "PLACE_ADMIN" } }]
        })
    }

    #[tokio::test]
    async fn login_stores_token_and_populates_context() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .withf(|request, _| request.operation_name == "Login" && request.variables["email"] == "ana@marketplace.com")
            .returning(|_, _| {
                Ok(GraphQLResponse::ok(json!({ "login": { "token": "novo-token", "user": user_json(5) } })))
            });

        let tokens = empty_tokens();
        let service = AuthService::new(client_with(transport, tokens.clone()), tokens.clone(), AuthContext::new());

        let user = service
            .login(&LoginUserPayload { email: "ana@marketplace.com".into(), password: "segredo1".into() })
            .await?;

        assert_eq!(user.id, 5);
        assert_eq!(tokens.get_token().as_deref(), Some("novo-token"));
        assert_eq!(service.context().current_user().map(|u| u.id), Some(5));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_transport() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let tokens = empty_tokens();
        let service = AuthService::new(client_with(transport, tokens.clone()), tokens, AuthContext::new());

        let result = service
            .login(&LoginUserPayload { email: "nao-e-email".into(), password: "123".into() })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let tokens = tokens_with("tok");
        let context = AuthContext::new();
        let service = AuthService::new(client_with(MockTransport::new(), tokens.clone()), tokens.clone(), context.clone());

        service.logout();

        assert!(!tokens.has_token());
        assert!(context.current_user().is_none());
        assert!(!context.is_loading());
    }

    #[tokio::test]
    async fn without_token_the_user_is_not_fetched() -> TestResult {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let tokens = empty_tokens();
        let service = AuthService::new(client_with(transport, tokens.clone()), tokens, AuthContext::new());

        assert!(service.current_user().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn current_user_is_loaded_once() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .returning(|_, _| Ok(GraphQLResponse::ok(json!({ "me": user_json(9) }))));

        let tokens = tokens_with("tok");
        let service = AuthService::new(client_with(transport, tokens.clone()), tokens, AuthContext::new());

        assert_eq!(service.current_user().await?.map(|u| u.id), Some(9));
        assert_eq!(service.current_user().await?.map(|u| u.id), Some(9));
        assert!(!service.context().is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn loading_flag_is_raised_while_me_is_in_flight() -> TestResult {
        let context = AuthContext::new();
        let observed = context.clone();

        let mut transport = MockTransport::new();
        transport.expect_execute().once().returning(move |_, _| {
            assert!(observed.is_loading());
            Ok(GraphQLResponse::ok(json!({ "me": user_json(9) })))
        });

        let tokens = tokens_with("tok");
        let service = AuthService::new(client_with(transport, tokens.clone()), tokens, context.clone());

        service.load_current_user().await?;

        assert!(!context.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn expired_token_ends_the_session() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_, _| Err(NetworkError::Status { status: 401, body: String::new() }));

        let tokens = tokens_with("expirado");
        let context = AuthContext::new();
        let service = AuthService::new(client_with(transport, tokens.clone()), tokens.clone(), context.clone());

        let result = service.load_current_user().await;

        assert!(result.is_err_and(|e| e.ends_session()));
        assert!(!tokens.has_token());
        assert!(context.current_user().is_none());
    }
}
