// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{common::error::AppError, config::AppState, models::dashboard::DashboardView};

// GET /dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores do marketplace e entradas de navegação do usuário", body = DashboardView),
        (status = 303, description = "Sem sessão: vai para o login")
    ),
    security(("console_token" = []))
)]
pub async fn get_dashboard(State(app_state): State<AppState>) -> Result<Json<DashboardView>, AppError> {
    let view = app_state.dashboard_service.summary().await?;
    Ok(Json(view))
}
