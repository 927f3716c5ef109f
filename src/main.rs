//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod graphql;
mod handlers;
mod middleware;
mod models;
mod services;
mod storage;
#[cfg(test)]
mod test_helpers;

// Importações principais
use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::{
    auth::{auth_guard, public_only},
    navigation::forced_navigation,
};

pub fn app(app_state: AppState) -> Router {
    // Login e registro: só para quem ainda não tem sessão
    let auth_routes = Router::new()
        .route("/login", get(handlers::auth::login_page).post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            public_only,
        ))
        .route("/logout", post(handlers::auth::logout));

    // Páginas protegidas; o papel de cada uma é checado pelo extrator RequireRole
    let console_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/admin", get(handlers::admin::admin_home))
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{user_id}/roles", post(handlers::admin::assign_role))
        .route("/admin/users/{user_id}/active", put(handlers::admin::set_user_active))
        .route("/admin/user-roles/{user_role_id}", delete(handlers::admin::remove_role))
        .route(
            "/admin/organizations",
            get(handlers::admin::list_organizations).post(handlers::admin::create_organization),
        )
        .route(
            "/admin/places",
            get(handlers::admin::list_places).post(handlers::admin::create_place),
        )
        .route("/admin/places/{place_id}/companies", get(handlers::companies::list_companies))
        .route("/admin/places/{place_id}/segmentation", get(handlers::companies::segmentation_overview))
        .route("/admin/companies", post(handlers::companies::create_company))
        .route(
            "/admin/companies/{company_id}",
            get(handlers::companies::get_company).put(handlers::companies::update_company),
        )
        .route("/admin/companies/{company_id}/active", put(handlers::companies::set_company_active))
        .route(
            "/admin/companies/{company_id}/segmentation",
            get(handlers::companies::company_segmentation).put(handlers::companies::assign_company_to_segment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(console_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            forced_navigation,
        ))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o filtro; sem ele, "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, o console não deve iniciar.
    let app_state = AppState::new()?;

    // Inicia o servidor
    let listener = TcpListener::bind(app_state.config.addr).await?;
    tracing::info!("🚀 Console escutando em {}", listener.local_addr()?);
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
