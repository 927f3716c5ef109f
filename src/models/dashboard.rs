// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::auth::User;

// 1. Contadores do topo (query DashboardStats)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub organizations: i64,
    pub places: i64,
    pub companies: i64,
    pub users: i64,
    #[serde(default)]
    pub companies_without_segmentation: i64,
}

// 2. Entradas de navegação que o usuário pode ver
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub is_super_admin: bool,
    pub is_company_staff: bool,
    pub can_access_admin: bool,
    pub can_manage_users: bool,
    pub can_manage_organizations: bool,
    pub can_manage_places: bool,
    pub can_manage_companies: bool,
    pub can_manage_segmentation: bool,
}

// 3. A página /dashboard inteira
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub user: User,
    pub stats: DashboardStats,
    pub capabilities: Capabilities,
}
