// src/handlers/companies.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{CompanyManagement, RequireRole, SegmentationManagement},
    models::{
        pagination::{Connection, PageArgs},
        segmentation::{AssignCompanyToSegmentPayload, SegmentationHierarchy, SegmentationOverview},
        tenancy::{Company, CreateCompanyPayload, SetActivePayload, UpdateCompanyPayload},
    },
};

// GET /admin/places/{place_id}/companies
#[utoipa::path(
    get,
    path = "/admin/places/{place_id}/companies",
    tag = "Companies",
    params(
        ("place_id" = i64, Path, description = "ID do place"),
        PageArgs
    ),
    responses(
        (status = 200, description = "Empresas do place, paginadas por cursor", body = Connection<Company>),
        (status = 303, description = "Sem permissão: volta para /admin")
    ),
    security(("console_token" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    _guard: RequireRole<CompanyManagement>,
    Path(place_id): Path<i64>,
    Query(args): Query<PageArgs>,
) -> Result<Json<Connection<Company>>, AppError> {
    let companies = app_state.company_service.list_companies(place_id, &args).await?;
    Ok(Json(companies))
}

#[utoipa::path(
    post,
    path = "/admin/companies",
    tag = "Companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 400, description = "Formulário inválido"),
        (status = 403, description = "Place fora do alcance do operador"),
        (status = 422, description = "Recusada pelo servidor")
    ),
    security(("console_token" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<CompanyManagement>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.create_company(&payload).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    get,
    path = "/admin/companies/{company_id}",
    tag = "Companies",
    params(("company_id" = i64, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("console_token" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<CompanyManagement>,
    Path(company_id): Path<i64>,
) -> Result<Json<Company>, AppError> {
    let company = app_state.company_service.company(company_id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/admin/companies/{company_id}",
    tag = "Companies",
    params(("company_id" = i64, Path, description = "ID da empresa")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 403, description = "Empresa fora do alcance do operador")
    ),
    security(("console_token" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<CompanyManagement>,
    Path(company_id): Path<i64>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<Json<Company>, AppError> {
    let company = app_state.company_service.update_company(company_id, &payload).await?;
    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/admin/companies/{company_id}/active",
    tag = "Companies",
    params(("company_id" = i64, Path, description = "ID da empresa")),
    request_body = SetActivePayload,
    responses((status = 200, description = "Empresa atualizada", body = Company)),
    security(("console_token" = []))
)]
pub async fn set_company_active(
    State(app_state): State<AppState>,
    _guard: RequireRole<CompanyManagement>,
    Path(company_id): Path<i64>,
    Json(payload): Json<SetActivePayload>,
) -> Result<Json<Company>, AppError> {
    let company = app_state
        .company_service
        .set_company_active(company_id, payload.is_active)
        .await?;
    Ok(Json(company))
}

// --- Segmentação ---

#[utoipa::path(
    get,
    path = "/admin/places/{place_id}/segmentation",
    tag = "Segmentation",
    params(("place_id" = i64, Path, description = "ID do place")),
    responses(
        (status = 200, description = "Taxonomia do place e empresas pendentes de classificação", body = SegmentationOverview),
        (status = 403, description = "Place fora do alcance do operador")
    ),
    security(("console_token" = []))
)]
pub async fn segmentation_overview(
    State(app_state): State<AppState>,
    _guard: RequireRole<SegmentationManagement>,
    Path(place_id): Path<i64>,
) -> Result<Json<SegmentationOverview>, AppError> {
    let overview = app_state.segmentation_service.overview(place_id).await?;
    Ok(Json(overview))
}

#[utoipa::path(
    get,
    path = "/admin/companies/{company_id}/segmentation",
    tag = "Segmentation",
    params(("company_id" = i64, Path, description = "ID da empresa")),
    responses((status = 200, description = "Hierarquia segmento → categoria → subcategoria", body = SegmentationHierarchy)),
    security(("console_token" = []))
)]
pub async fn company_segmentation(
    State(app_state): State<AppState>,
    _guard: RequireRole<SegmentationManagement>,
    Path(company_id): Path<i64>,
) -> Result<Json<SegmentationHierarchy>, AppError> {
    let hierarchy = app_state.segmentation_service.hierarchy(company_id).await?;
    Ok(Json(hierarchy))
}

#[utoipa::path(
    put,
    path = "/admin/companies/{company_id}/segmentation",
    tag = "Segmentation",
    params(("company_id" = i64, Path, description = "ID da empresa")),
    request_body = AssignCompanyToSegmentPayload,
    responses(
        (status = 200, description = "Empresa reclassificada", body = Company),
        (status = 400, description = "Subcategoria sem categoria"),
        (status = 422, description = "Caminho da taxonomia recusado pelo servidor")
    ),
    security(("console_token" = []))
)]
pub async fn assign_company_to_segment(
    State(app_state): State<AppState>,
    _guard: RequireRole<SegmentationManagement>,
    Path(company_id): Path<i64>,
    Json(payload): Json<AssignCompanyToSegmentPayload>,
) -> Result<Json<Company>, AppError> {
    let company = app_state
        .segmentation_service
        .assign_company_to_segment(company_id, &payload)
        .await?;
    Ok(Json(company))
}
