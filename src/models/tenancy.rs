// src/models/tenancy.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::segmentation::{Category, Subcategory};

// ---
// 1. Organization (O topo da hierarquia de tenancy)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

// ---
// 2. Place (Unidade geográfica dentro de uma Organization)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub organization_id: i64,
    #[serde(default)]
    pub is_active: bool,
}

// ---
// 3. Company (Pertence a um Place; pode estar classificada)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub place_id: i64,
    #[serde(default)]
    pub is_active: bool,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
}

// --- Payloads (os "formulários" do console) ---

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlacePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Organização inválida."))]
    pub organization_id: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 2, max = 120, message = "O nome deve ter entre 2 e 120 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "A descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Place inválido."))]
    pub place_id: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 2, max = 120, message = "O nome deve ter entre 2 e 120 caracteres"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "A descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetActivePayload {
    pub is_active: bool,
}
