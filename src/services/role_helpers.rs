// src/services/role_helpers.rs
//
// Predicados de papel para esconder/mostrar partes do console. São só
// portões de interface: o servidor revalida toda mutation por conta própria.

use crate::models::{
    auth::{RoleName, User},
    dashboard::Capabilities,
    tenancy::Company,
};

use crate::models::auth::RoleName::*;

/// Verdadeiro se o usuário tem uma concessão com esse papel.
///
/// A flag `is_active` da concessão NÃO é consultada (comportamento mantido
/// até o servidor confirmar a semântica).
pub fn has_role(user: &User, role: RoleName) -> bool {
    user.user_roles.iter().any(|user_role| user_role.role.name == role)
}

pub fn has_any_role(user: &User, roles: &[RoleName]) -> bool {
    roles.iter().any(|role| has_role(user, *role))
}

pub fn is_super_admin(user: &User) -> bool {
    has_role(user, SuperAdmin)
}

pub fn is_organization_admin(user: &User) -> bool {
    has_role(user, OrganizationAdmin)
}

pub fn is_place_admin(user: &User) -> bool {
    has_role(user, PlaceAdmin)
}

pub fn is_company_admin(user: &User) -> bool {
    has_role(user, CompanyAdmin)
}

pub fn is_company_staff(user: &User) -> bool {
    has_role(user, CompanyStaff)
}

pub fn can_manage_users(user: &User) -> bool {
    has_any_role(user, &[SuperAdmin, OrganizationAdmin, PlaceAdmin])
}

pub fn can_manage_companies(user: &User) -> bool {
    has_any_role(user, &[SuperAdmin, PlaceAdmin, CompanyAdmin])
}

pub fn can_manage_places(user: &User) -> bool {
    has_any_role(user, &[SuperAdmin, OrganizationAdmin])
}

pub fn can_manage_organizations(user: &User) -> bool {
    is_super_admin(user)
}

pub fn can_manage_segmentation(user: &User) -> bool {
    has_any_role(user, &[SuperAdmin, PlaceAdmin])
}

pub fn can_access_admin(user: &User) -> bool {
    has_any_role(user, &[SuperAdmin, OrganizationAdmin, PlaceAdmin, CompanyAdmin])
}

// --- Predicados com escopo de tenancy ---

fn is_admin_of_place(user: &User, place_id: i64) -> bool {
    is_place_admin(user) && user.place_id == Some(place_id)
}

pub fn can_create_company_in_place(user: &User, place_id: i64) -> bool {
    is_super_admin(user) || is_admin_of_place(user, place_id)
}

pub fn can_manage_specific_company(user: &User, company_place_id: i64) -> bool {
    is_super_admin(user) || is_admin_of_place(user, company_place_id)
}

/// Como `can_manage_specific_company`, mas também aceita o admin da própria empresa.
pub fn can_edit_company(user: &User, company: &Company) -> bool {
    can_manage_specific_company(user, company.place_id)
        || (is_company_admin(user) && user.company_id == Some(company.id))
}

pub fn capabilities(user: &User) -> Capabilities {
    Capabilities {
        is_super_admin: is_super_admin(user),
        is_company_staff: is_company_staff(user),
        can_access_admin: can_access_admin(user),
        can_manage_users: can_manage_users(user),
        can_manage_organizations: can_manage_organizations(user),
        can_manage_places: can_manage_places(user),
        can_manage_companies: can_manage_companies(user),
        can_manage_segmentation: can_manage_segmentation(user),
    }
}
