// src/graphql/operations.rs
//
// Documentos GraphQL consumidos pelo console. O contrato é o schema que o
// servidor publica; aqui só compomos as operações.

use crate::graphql::{Operation, OperationKind};

// Fragmentos compartilhados (concat! só aceita literais, daí as macros)
macro_rules! user_fields {
    () => {
        "fragment UserFields on User {
            __typename id email firstName lastName isVerified isActive
            organizationId placeId companyId createdAt updatedAt
            organization { __typename id name description isActive }
            place { __typename id name description organizationId isActive }
            company { __typename id name description placeId isActive }
            userRoles { __typename id isActive role { __typename id name description } }
        }"
    };
}

macro_rules! taxonomy_fields {
    () => {
        "fragment CategoryFields on Category {
            __typename id name segments { __typename id name }
        }
        fragment SubcategoryFields on Subcategory {
            __typename id name category { ...CategoryFields }
        }"
    };
}

macro_rules! company_fields {
    () => {
        concat!(
            "fragment CompanyFields on Company {
                __typename id name description placeId isActive
                category { ...CategoryFields }
                subcategory { ...SubcategoryFields }
            }",
            taxonomy_fields!()
        )
    };
}

macro_rules! page_info {
    () => {
        "pageInfo { startCursor endCursor hasNextPage hasPreviousPage } totalCount"
    };
}

// =============================================================================
//  AUTH
// =============================================================================

pub const LOGIN: Operation = Operation {
    name: "Login",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation Login($email: String!, $password: String!) {
            login(email: $email, password: $password) { token user { ...UserFields } }
        }",
        user_fields!()
    ),
    root_fields: &["login"],
};

pub const REGISTER: Operation = Operation {
    name: "Register",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation Register($input: RegisterInput!) {
            register(input: $input) { token user { ...UserFields } }
        }",
        user_fields!()
    ),
    root_fields: &["register"],
};

pub const ME: Operation = Operation {
    name: "Me",
    kind: OperationKind::Query,
    document: concat!("query Me { me { ...UserFields } }", user_fields!()),
    root_fields: &["me"],
};

// =============================================================================
//  DASHBOARD
// =============================================================================

pub const DASHBOARD_STATS: Operation = Operation {
    name: "DashboardStats",
    kind: OperationKind::Query,
    document: "query DashboardStats {
        dashboardStats { organizations places companies users companiesWithoutSegmentation }
    }",
    root_fields: &["dashboardStats"],
};

// =============================================================================
//  ADMIN
// =============================================================================

pub const GET_USERS: Operation = Operation {
    name: "GetUsers",
    kind: OperationKind::Query,
    document: concat!(
        "query GetUsers($first: Int, $after: String, $search: String) {
            users(first: $first, after: $after, search: $search) {
                edges { cursor node { ...UserFields } }
                ",
        page_info!(),
        "
            }
        }",
        user_fields!()
    ),
    root_fields: &["users"],
};

pub const ASSIGN_ROLE: Operation = Operation {
    name: "AssignRole",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation AssignRole($userId: Int!, $role: RoleName!) {
            assignRole(userId: $userId, role: $role) { ...UserFields }
        }",
        user_fields!()
    ),
    root_fields: &["assignRole"],
};

pub const REMOVE_ROLE: Operation = Operation {
    name: "RemoveRole",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation RemoveRole($userRoleId: Int!) {
            removeRole(userRoleId: $userRoleId) { ...UserFields }
        }",
        user_fields!()
    ),
    root_fields: &["removeRole"],
};

pub const SET_USER_ACTIVE: Operation = Operation {
    name: "SetUserActive",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation SetUserActive($userId: Int!, $isActive: Boolean!) {
            setUserActive(userId: $userId, isActive: $isActive) { ...UserFields }
        }",
        user_fields!()
    ),
    root_fields: &["setUserActive"],
};

pub const GET_ORGANIZATIONS: Operation = Operation {
    name: "GetOrganizations",
    kind: OperationKind::Query,
    document: "query GetOrganizations {
        organizations { __typename id name description isActive }
    }",
    root_fields: &["organizations"],
};

pub const CREATE_ORGANIZATION: Operation = Operation {
    name: "CreateOrganization",
    kind: OperationKind::Mutation,
    document: "mutation CreateOrganization($input: CreateOrganizationInput!) {
        createOrganization(input: $input) { __typename id name description isActive }
    }",
    root_fields: &["createOrganization"],
};

pub const GET_PLACES: Operation = Operation {
    name: "GetPlaces",
    kind: OperationKind::Query,
    document: "query GetPlaces($organizationId: Int) {
        places(organizationId: $organizationId) {
            __typename id name description organizationId isActive
        }
    }",
    root_fields: &["places"],
};

pub const CREATE_PLACE: Operation = Operation {
    name: "CreatePlace",
    kind: OperationKind::Mutation,
    document: "mutation CreatePlace($input: CreatePlaceInput!) {
        createPlace(input: $input) { __typename id name description organizationId isActive }
    }",
    root_fields: &["createPlace"],
};

// =============================================================================
//  COMPANY
// =============================================================================

pub const GET_COMPANIES: Operation = Operation {
    name: "GetCompanies",
    kind: OperationKind::Query,
    document: concat!(
        "query GetCompanies($placeId: Int!, $first: Int, $after: String, $search: String) {
            companies(placeId: $placeId, first: $first, after: $after, search: $search) {
                edges { cursor node { ...CompanyFields } }
                ",
        page_info!(),
        "
            }
        }",
        company_fields!()
    ),
    root_fields: &["companies"],
};

pub const GET_COMPANY: Operation = Operation {
    name: "GetCompany",
    kind: OperationKind::Query,
    document: concat!(
        "query GetCompany($id: Int!) { company(id: $id) { ...CompanyFields } }",
        company_fields!()
    ),
    root_fields: &["company"],
};

pub const CREATE_COMPANY: Operation = Operation {
    name: "CreateCompany",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CreateCompany($input: CreateCompanyInput!) {
            createCompany(input: $input) { ...CompanyFields }
        }",
        company_fields!()
    ),
    root_fields: &["createCompany"],
};

pub const UPDATE_COMPANY: Operation = Operation {
    name: "UpdateCompany",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation UpdateCompany($id: Int!, $input: UpdateCompanyInput!) {
            updateCompany(id: $id, input: $input) { ...CompanyFields }
        }",
        company_fields!()
    ),
    root_fields: &["updateCompany"],
};

pub const SET_COMPANY_ACTIVE: Operation = Operation {
    name: "SetCompanyActive",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation SetCompanyActive($id: Int!, $isActive: Boolean!) {
            setCompanyActive(id: $id, isActive: $isActive) { ...CompanyFields }
        }",
        company_fields!()
    ),
    root_fields: &["setCompanyActive"],
};

pub const GET_SEGMENTATION_DATA_FOR_PLACE: Operation = Operation {
    name: "GetSegmentationDataForPlace",
    kind: OperationKind::Query,
    document: concat!(
        "query GetSegmentationDataForPlace($placeId: Int!) {
            segmentationDataForPlace(placeId: $placeId) {
                segments { __typename id name }
                categories { ...CategoryFields }
                subcategories { ...SubcategoryFields }
                companies { ...CompanyFields }
            }
        }",
        company_fields!()
    ),
    root_fields: &["segmentationDataForPlace"],
};

pub const COMPANIES_WITHOUT_SEGMENTATION: Operation = Operation {
    name: "CompaniesWithoutSegmentation",
    kind: OperationKind::Query,
    document: concat!(
        "query CompaniesWithoutSegmentation($placeId: Int!) {
            companiesWithoutSegmentation(placeId: $placeId) { ...CompanyFields }
        }",
        company_fields!()
    ),
    root_fields: &["companiesWithoutSegmentation"],
};

pub const ASSIGN_COMPANY_TO_SEGMENT: Operation = Operation {
    name: "AssignCompanyToSegment",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation AssignCompanyToSegment(
            $companyId: Int!, $segmentId: Int!, $categoryId: Int, $subcategoryId: Int
        ) {
            assignCompanyToSegment(
                companyId: $companyId, segmentId: $segmentId,
                categoryId: $categoryId, subcategoryId: $subcategoryId
            ) { ...CompanyFields }
        }",
        company_fields!()
    ),
    root_fields: &["assignCompanyToSegment"],
};
