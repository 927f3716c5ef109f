// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminAccess, OrganizationManagement, PlaceManagement, RequireRole, UserManagement},
    },
    models::{
        auth::User,
        dashboard::Capabilities,
        pagination::{Connection, PageArgs},
        tenancy::{CreateOrganizationPayload, CreatePlacePayload, Organization, Place, SetActivePayload},
    },
    services::{admin_service::AssignRolePayload, role_helpers},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlacesQuery {
    pub organization_id: Option<i64>,
}

// GET /admin
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin",
    responses(
        (status = 200, description = "Seções da administração visíveis ao usuário", body = Capabilities),
        (status = 303, description = "Sem acesso: vai para o dashboard")
    ),
    security(("console_token" = []))
)]
pub async fn admin_home(
    _guard: RequireRole<AdminAccess>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<Capabilities> {
    Json(role_helpers::capabilities(&user))
}

// --- Usuários ---

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    params(PageArgs),
    responses(
        (status = 200, description = "Página de usuários, já mesclada com as anteriores", body = Connection<User>),
        (status = 303, description = "Sem permissão: volta para /admin")
    ),
    security(("console_token" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<UserManagement>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Connection<User>>, AppError> {
    let users = app_state.admin_service.list_users(&args).await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/admin/users/{user_id}/roles",
    tag = "Admin",
    params(("user_id" = i64, Path, description = "ID do usuário")),
    request_body = AssignRolePayload,
    responses(
        (status = 200, description = "Usuário com o novo papel", body = User),
        (status = 403, description = "Papel fora do alcance do operador"),
        (status = 422, description = "Recusado pelo servidor")
    ),
    security(("console_token" = []))
)]
pub async fn assign_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<UserManagement>,
    Path(user_id): Path<i64>,
    Json(payload): Json<AssignRolePayload>,
) -> Result<Json<User>, AppError> {
    let user = app_state.admin_service.assign_role(user_id, &payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/admin/user-roles/{user_role_id}",
    tag = "Admin",
    params(("user_role_id" = i64, Path, description = "ID da concessão de papel")),
    responses((status = 200, description = "Usuário sem o papel", body = User)),
    security(("console_token" = []))
)]
pub async fn remove_role(
    State(app_state): State<AppState>,
    _guard: RequireRole<UserManagement>,
    Path(user_role_id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = app_state.admin_service.remove_role(user_role_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/admin/users/{user_id}/active",
    tag = "Admin",
    params(("user_id" = i64, Path, description = "ID do usuário")),
    request_body = SetActivePayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 403, description = "O operador não pode se desativar")
    ),
    security(("console_token" = []))
)]
pub async fn set_user_active(
    State(app_state): State<AppState>,
    _guard: RequireRole<UserManagement>,
    Path(user_id): Path<i64>,
    Json(payload): Json<SetActivePayload>,
) -> Result<Json<User>, AppError> {
    let user = app_state.admin_service.set_user_active(user_id, payload.is_active).await?;
    Ok(Json(user))
}

// --- Organizações e places ---

#[utoipa::path(
    get,
    path = "/admin/organizations",
    tag = "Admin",
    responses(
        (status = 200, description = "Organizações", body = Vec<Organization>),
        (status = 303, description = "Só Super Admin: volta para /admin")
    ),
    security(("console_token" = []))
)]
pub async fn list_organizations(
    State(app_state): State<AppState>,
    _guard: RequireRole<OrganizationManagement>,
) -> Result<Json<Vec<Organization>>, AppError> {
    let organizations = app_state.admin_service.organizations().await?;
    Ok(Json(organizations))
}

#[utoipa::path(
    post,
    path = "/admin/organizations",
    tag = "Admin",
    request_body = CreateOrganizationPayload,
    responses(
        (status = 201, description = "Organização criada", body = Organization),
        (status = 400, description = "Formulário inválido")
    ),
    security(("console_token" = []))
)]
pub async fn create_organization(
    State(app_state): State<AppState>,
    _guard: RequireRole<OrganizationManagement>,
    Json(payload): Json<CreateOrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let organization = app_state.admin_service.create_organization(&payload).await?;
    Ok((StatusCode::CREATED, Json(organization)))
}

#[utoipa::path(
    get,
    path = "/admin/places",
    tag = "Admin",
    params(PlacesQuery),
    responses((status = 200, description = "Places visíveis ao operador", body = Vec<Place>)),
    security(("console_token" = []))
)]
pub async fn list_places(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminAccess>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<Vec<Place>>, AppError> {
    let places = app_state.admin_service.places(query.organization_id).await?;
    Ok(Json(places))
}

#[utoipa::path(
    post,
    path = "/admin/places",
    tag = "Admin",
    request_body = CreatePlacePayload,
    responses(
        (status = 201, description = "Place criado", body = Place),
        (status = 403, description = "Organização fora do alcance do operador")
    ),
    security(("console_token" = []))
)]
pub async fn create_place(
    State(app_state): State<AppState>,
    _guard: RequireRole<PlaceManagement>,
    Json(payload): Json<CreatePlacePayload>,
) -> Result<impl IntoResponse, AppError> {
    let place = app_state.admin_service.create_place(&payload).await?;
    Ok((StatusCode::CREATED, Json(place)))
}
