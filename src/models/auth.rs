// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::tenancy::{Company, Organization, Place};

// ---
// 1. RoleName (A enumeração fixa de papéis do servidor)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    SuperAdmin,
    OrganizationAdmin,
    PlaceAdmin,
    CompanyAdmin,
    CompanyStaff,
    PublicUser,
}

impl RoleName {
    pub const ALL: [RoleName; 6] = [
        RoleName::SuperAdmin,
        RoleName::OrganizationAdmin,
        RoleName::PlaceAdmin,
        RoleName::CompanyAdmin,
        RoleName::CompanyStaff,
        RoleName::PublicUser,
    ];

    /// Nome exatamente como aparece no schema GraphQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::SuperAdmin => "SUPER_ADMIN",
            RoleName::OrganizationAdmin => "ORGANIZATION_ADMIN",
            RoleName::PlaceAdmin => "PLACE_ADMIN",
            RoleName::CompanyAdmin => "COMPANY_ADMIN",
            RoleName::CompanyStaff => "COMPANY_STAFF",
            RoleName::PublicUser => "PUBLIC_USER",
        }
    }
}

// ---
// 2. Role (imutável do ponto de vista do console)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = 1)]
    pub id: i64,
    pub name: RoleName,
    pub description: Option<String>,
}

// ---
// 3. UserRole (A "Ponte" Usuário-Role, com flag própria)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: i64,
    // Uma concessão pode ser desativada sem ser apagada
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub role: Role,
}

fn default_true() -> bool {
    true
}

// Representa o usuário como o servidor GraphQL o devolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "admin@marketplace.com")]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub organization_id: Option<i64>,
    pub place_id: Option<i64>,
    pub company_id: Option<i64>,
    // Vínculos de tenancy resolvidos pelo servidor
    pub organization: Option<Organization>,
    pub place: Option<Place>,
    pub company: Option<Company>,
    #[serde(default)]
    pub user_roles: Vec<UserRole>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}

// Dados para login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@marketplace.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Dados para registro de um novo usuário
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
}

// Resposta das mutations Login/Register
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}
