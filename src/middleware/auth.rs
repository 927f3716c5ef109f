// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    common::{error::AppError, navigation::DASHBOARD_PATH},
    config::AppState,
    middleware::guard::{GuardState, RouteGuard},
    models::auth::User,
};

// O usuário da sessão, colocado nos extensions pelo `auth_guard`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

// O middleware em si: sem sessão válida, nenhuma página protegida é servida
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = app_state.auth_service.current_user().await?;

    let guard = RouteGuard::authenticated();
    let state = guard.evaluate(app_state.tokens.has_token(), user.as_ref());

    match (state, user) {
        (GuardState::Authorized, Some(user)) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            Ok(next.run(request).await)
        }
        // Vai para o login
        _ => Err(AppError::Unauthenticated),
    }
}

// Quem já tem sessão não precisa ver o login de novo
pub async fn public_only(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if app_state.auth_service.has_session() {
        match app_state.auth_service.current_user().await {
            Ok(Some(_)) => return Redirect::to(DASHBOARD_PATH).into_response(),
            Ok(None) => {}
            // Token recusado já foi descartado; o login segue normalmente
            Err(e) => {
                tracing::warn!("Sessão anterior não pôde ser restaurada: {}", e);
                app_state.navigation.take();
            }
        }
    }

    next.run(request).await
}

// Extrator para obter o usuário autenticado diretamente nos handlers
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
