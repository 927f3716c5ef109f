// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login_page,
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Admin ---
        handlers::admin::admin_home,
        handlers::admin::list_users,
        handlers::admin::assign_role,
        handlers::admin::remove_role,
        handlers::admin::set_user_active,
        handlers::admin::list_organizations,
        handlers::admin::create_organization,
        handlers::admin::list_places,
        handlers::admin::create_place,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::create_company,
        handlers::companies::get_company,
        handlers::companies::update_company,
        handlers::companies::set_company_active,

        // --- Segmentation ---
        handlers::companies::segmentation_overview,
        handlers::companies::company_segmentation,
        handlers::companies::assign_company_to_segment,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::RoleName,
            models::auth::Role,
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::RegisterUserPayload,
            handlers::auth::LoginPage,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::Capabilities,
            models::dashboard::DashboardView,

            // --- Tenancy ---
            models::tenancy::Organization,
            models::tenancy::Place,
            models::tenancy::Company,
            models::tenancy::CreateOrganizationPayload,
            models::tenancy::CreatePlacePayload,
            models::tenancy::CreateCompanyPayload,
            models::tenancy::UpdateCompanyPayload,
            models::tenancy::SetActivePayload,

            // --- Segmentation ---
            models::segmentation::Segment,
            models::segmentation::Category,
            models::segmentation::Subcategory,
            models::segmentation::SegmentationHierarchy,
            models::segmentation::SegmentationData,
            models::segmentation::SegmentationOverview,
            models::segmentation::CompanySegmentation,
            models::segmentation::AssignCompanyToSegmentPayload,

            // --- Payloads ---
            crate::services::admin_service::AssignRolePayload,
            models::pagination::PageInfo,
        )
    ),
    tags(
        (name = "Auth", description = "Login, Registro e Sessão do Operador"),
        (name = "Dashboard", description = "Contadores do Marketplace"),
        (name = "Admin", description = "Usuários, Papéis, Organizações e Places"),
        (name = "Companies", description = "Gestão de Empresas"),
        (name = "Segmentation", description = "Segmentos, Categorias e Subcategorias")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        // O token fica com o console; o navegador nunca o envia
        components.add_security_scheme(
            "console_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token repassado pelo console ao servidor GraphQL"))
                    .build(),
            ),
        );
    }
}
