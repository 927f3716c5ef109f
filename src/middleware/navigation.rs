// src/middleware/navigation.rs

use std::{cell::RefCell, future::Future};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{common::navigation::Navigator, config::AppState};

tokio::task_local! {
    // Destino pedido durante a requisição em andamento
    static REQUEST_TARGET: RefCell<Option<String>>;
}

/// Destino pendente pedido fora de um handler (ex.: o error link após um 401).
///
/// Cada requisição tem o seu próprio slot; fora de `scope` o pedido é ignorado.
#[derive(Debug, Default)]
pub struct PendingNavigation;

impl PendingNavigation {
    pub fn new() -> Self {
        Self
    }

    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        REQUEST_TARGET.scope(RefCell::new(None), future).await
    }

    pub fn take(&self) -> Option<String> {
        REQUEST_TARGET
            .try_with(|target| target.borrow_mut().take())
            .ok()
            .flatten()
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&self, path: &str) {
        let recorded = REQUEST_TARGET.try_with(|target| {
            *target.borrow_mut() = Some(path.to_string());
        });

        match recorded {
            Ok(()) => tracing::debug!("Navegação forçada para {}", path),
            Err(_) => tracing::debug!("Navegação para {} pedida fora de uma requisição", path),
        }
    }
}

// Se algo pediu navegação durante a requisição, a resposta vira redirect
pub async fn forced_navigation(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let navigation = app_state.navigation.clone();

    app_state
        .navigation
        .scope(async move {
            let response = next.run(request).await;

            match navigation.take() {
                Some(target) => Redirect::to(&target).into_response(),
                None => response,
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pending_target_is_consumed_once() {
        let pending = PendingNavigation::new();

        let (first, second) = pending
            .scope(async {
                pending.navigate("/auth/login");
                pending.navigate("/auth/login");
                (pending.take(), pending.take())
            })
            .await;

        assert_eq!(first.as_deref(), Some("/auth/login"));
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn each_request_sees_only_its_own_target() {
        let pending = PendingNavigation::new();

        let (expired, unrelated) = tokio::join!(
            pending.scope(async {
                pending.navigate("/auth/login");
                tokio::task::yield_now().await;
                pending.take()
            }),
            pending.scope(async {
                tokio::task::yield_now().await;
                pending.take()
            }),
        );

        assert_eq!(expired.as_deref(), Some("/auth/login"));
        assert_eq!(unrelated, None);
    }

    #[test]
    fn navigation_outside_a_request_is_dropped() {
        let pending = PendingNavigation::new();
        pending.navigate("/auth/login");
        assert_eq!(pending.take(), None);
    }
}
