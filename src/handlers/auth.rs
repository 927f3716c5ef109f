// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{
        error::AppError,
        navigation::{DASHBOARD_PATH, LOGIN_PATH},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginUserPayload, RegisterUserPayload, User},
};

// O que a página de login precisa para se desenhar
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    pub graphql_url: String,
    pub register_path: &'static str,
    // Uma restauração de sessão ainda está em andamento
    pub session_loading: bool,
}

// GET /auth/login
#[utoipa::path(
    get,
    path = "/auth/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Página de login", body = LoginPage),
        (status = 303, description = "Já autenticado: vai para o dashboard")
    )
)]
pub async fn login_page(State(app_state): State<AppState>) -> Json<LoginPage> {
    Json(LoginPage {
        graphql_url: app_state.config.graphql_url.clone(),
        register_path: "/auth/register",
        session_loading: app_state.auth_service.context().is_loading(),
    })
}

// Handler de login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 303, description = "Sessão iniciada, redireciona para o dashboard"),
        (status = 400, description = "Formulário inválido"),
        (status = 422, description = "Credenciais recusadas pelo servidor")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Redirect, AppError> {
    app_state.auth_service.login(&payload).await?;
    Ok(Redirect::to(DASHBOARD_PATH))
}

// Handler de registro
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 303, description = "Conta criada e sessão iniciada"),
        (status = 400, description = "Formulário inválido"),
        (status = 422, description = "Cadastro recusado pelo servidor")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Redirect, AppError> {
    app_state.auth_service.register(&payload).await?;
    Ok(Redirect::to(DASHBOARD_PATH))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses((status = 303, description = "Sessão encerrada, volta ao login"))
)]
pub async fn logout(State(app_state): State<AppState>) -> impl IntoResponse {
    app_state.auth_service.logout();
    Redirect::to(LOGIN_PATH)
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário da sessão", body = User),
        (status = 303, description = "Sem sessão: vai para o login")
    ),
    security(("console_token" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
