// src/middleware/guard.rs

use crate::{
    common::navigation::{DASHBOARD_PATH, LOGIN_PATH},
    models::auth::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    AuthenticatedUnauthorized,
    Authorized,
}

/// Decide, a cada navegação, se a página pode ser servida.
#[derive(Clone, Copy)]
pub struct RouteGuard {
    predicate: Option<fn(&User) -> bool>,
    fallback: &'static str,
}

impl RouteGuard {
    /// Só exige sessão.
    pub const fn authenticated() -> Self {
        Self { predicate: None, fallback: DASHBOARD_PATH }
    }

    pub const fn requiring(predicate: fn(&User) -> bool) -> Self {
        Self { predicate: Some(predicate), fallback: DASHBOARD_PATH }
    }

    pub const fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn evaluate(&self, has_token: bool, user: Option<&User>) -> GuardState {
        let Some(user) = user.filter(|_| has_token) else {
            return GuardState::Unauthenticated;
        };

        match self.predicate {
            Some(allowed) if !allowed(user) => GuardState::AuthenticatedUnauthorized,
            _ => GuardState::Authorized,
        }
    }

    /// Para onde mandar o operador; `None` quando a página pode ser servida.
    pub fn redirect_for(&self, state: GuardState) -> Option<&'static str> {
        match state {
            GuardState::Unauthenticated => Some(LOGIN_PATH),
            GuardState::AuthenticatedUnauthorized => Some(self.fallback),
            GuardState::Authorized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::navigation::ADMIN_PATH,
        models::auth::RoleName::*,
        services::role_helpers::{self, fixtures::user},
    };

    #[test]
    fn no_token_is_unauthenticated_even_with_a_stale_user() {
        let guard = RouteGuard::requiring(role_helpers::can_access_admin);
        let admin = user(&[SuperAdmin], None);

        assert_eq!(guard.evaluate(false, Some(&admin)), GuardState::Unauthenticated);
        assert_eq!(guard.evaluate(false, None), GuardState::Unauthenticated);
        assert_eq!(guard.redirect_for(GuardState::Unauthenticated), Some(LOGIN_PATH));
    }

    #[test]
    fn failing_predicate_goes_to_the_fallback() {
        let staff = user(&[CompanyStaff], None);

        let admin_area = RouteGuard::requiring(role_helpers::can_access_admin);
        let state = admin_area.evaluate(true, Some(&staff));
        assert_eq!(state, GuardState::AuthenticatedUnauthorized);
        assert_eq!(admin_area.redirect_for(state), Some(DASHBOARD_PATH));

        let organizations = RouteGuard::requiring(role_helpers::is_super_admin).with_fallback(ADMIN_PATH);
        let place_admin = user(&[PlaceAdmin], Some(7));
        let state = organizations.evaluate(true, Some(&place_admin));
        assert_eq!(organizations.redirect_for(state), Some(ADMIN_PATH));
    }

    #[test]
    fn authorized_user_stays_on_the_page() {
        let guard = RouteGuard::requiring(role_helpers::can_manage_segmentation);
        let place_admin = user(&[PlaceAdmin], Some(7));

        let state = guard.evaluate(true, Some(&place_admin));
        assert_eq!(state, GuardState::Authorized);
        assert_eq!(guard.redirect_for(state), None);

        // Sem predicado basta a sessão
        let state = RouteGuard::authenticated().evaluate(true, Some(&user(&[], None)));
        assert_eq!(state, GuardState::Authorized);
    }
}
