// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use std::marker::PhantomData;

use crate::{
    common::navigation::{ADMIN_PATH, DASHBOARD_PATH},
    config::AppState,
    middleware::{auth::AuthenticatedUser, guard::RouteGuard},
    models::auth::User,
    services::role_helpers,
};

/// 1. O Trait que define uma exigência de papel
pub trait RoleRequirement: Send + Sync + 'static {
    fn allows(user: &User) -> bool;

    fn fallback() -> &'static str {
        DASHBOARD_PATH
    }
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Usuário colocado pelo auth_guard
        let user = parts.extensions.get::<AuthenticatedUser>().map(|u| &u.0);

        // B. Avalia o guard da página
        let guard = RouteGuard::requiring(T::allows).with_fallback(T::fallback());
        let state = guard.evaluate(app_state.tokens.has_token(), user);

        match guard.redirect_for(state) {
            Some(target) => {
                tracing::debug!("Navegação recusada ({:?}), redirecionando para {}", state, target);
                Err(Redirect::to(target))
            }
            None => Ok(RequireRole(PhantomData)),
        }
    }
}

// ---
// DEFINIÇÃO DAS EXIGÊNCIAS (TIPOS)
// ---

pub struct AdminAccess;
impl RoleRequirement for AdminAccess {
    fn allows(user: &User) -> bool { role_helpers::can_access_admin(user) }
}

pub struct UserManagement;
impl RoleRequirement for UserManagement {
    fn allows(user: &User) -> bool { role_helpers::can_manage_users(user) }
    fn fallback() -> &'static str { ADMIN_PATH }
}

pub struct OrganizationManagement;
impl RoleRequirement for OrganizationManagement {
    fn allows(user: &User) -> bool { role_helpers::is_super_admin(user) }
    fn fallback() -> &'static str { ADMIN_PATH }
}

pub struct PlaceManagement;
impl RoleRequirement for PlaceManagement {
    fn allows(user: &User) -> bool { role_helpers::can_manage_places(user) }
    fn fallback() -> &'static str { ADMIN_PATH }
}

pub struct CompanyManagement;
impl RoleRequirement for CompanyManagement {
    fn allows(user: &User) -> bool { role_helpers::can_manage_companies(user) }
    fn fallback() -> &'static str { ADMIN_PATH }
}

pub struct SegmentationManagement;
impl RoleRequirement for SegmentationManagement {
    fn allows(user: &User) -> bool { role_helpers::can_manage_segmentation(user) }
    fn fallback() -> &'static str { ADMIN_PATH }
}
