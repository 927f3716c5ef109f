// src/services/company_service.rs

use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    graphql::{operations, FetchPolicy, GraphQLClient},
    models::{
        auth::User,
        pagination::{Connection, PageArgs},
        tenancy::{Company, CreateCompanyPayload, UpdateCompanyPayload},
    },
    services::{auth::AuthContext, role_helpers},
};

#[derive(Deserialize)]
struct CompaniesData {
    companies: Connection<Company>,
}

#[derive(Deserialize)]
struct CompanyData {
    company: Option<Company>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCompanyData {
    create_company: Company,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCompanyData {
    update_company: Company,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetCompanyActiveData {
    set_company_active: Company,
}

// Campos de topo que mudam quando o conjunto de empresas muda
const COMPANY_LISTS: [&str; 3] = ["companies", "companiesWithoutSegmentation", "dashboardStats"];

#[derive(Clone)]
pub struct CompanyService {
    client: GraphQLClient,
    context: AuthContext,
}

impl CompanyService {
    pub fn new(client: GraphQLClient, context: AuthContext) -> Self {
        Self { client, context }
    }

    fn manager(&self) -> Result<User, AppError> {
        let user = self.context.require_user()?;
        if !role_helpers::can_manage_companies(&user) {
            return Err(AppError::forbidden("gerenciar empresas"));
        }
        Ok(user)
    }

    pub async fn list_companies(&self, place_id: i64, args: &PageArgs) -> Result<Connection<Company>, AppError> {
        self.manager()?;

        let policy = match args.after {
            Some(_) => FetchPolicy::NetworkOnly,
            None => FetchPolicy::CacheFirst,
        };
        let variables = json!({
            "placeId": place_id,
            "first": args.page_size(),
            "after": args.after,
            "search": args.search,
        });

        let data: CompaniesData = self.client.query(&operations::GET_COMPANIES, variables, policy).await?;
        Ok(data.companies)
    }

    pub async fn company(&self, company_id: i64) -> Result<Company, AppError> {
        self.manager()?;

        let data: CompanyData = self
            .client
            .query(&operations::GET_COMPANY, json!({ "id": company_id }), FetchPolicy::CacheFirst)
            .await?;

        data.company
            .ok_or_else(|| AppError::NotFound(format!("empresa {}", company_id)))
    }

    pub async fn create_company(&self, payload: &CreateCompanyPayload) -> Result<Company, AppError> {
        // 1. Validação local primeiro: nada de rede com formulário inválido
        payload.validate()?;

        // 2. Escopo de tenancy
        let user = self.manager()?;
        if !role_helpers::can_create_company_in_place(&user, payload.place_id) {
            return Err(AppError::forbidden("criar empresas neste place"));
        }

        // 3. Mutation + invalidação das listas
        let data: CreateCompanyData = self
            .client
            .mutate(&operations::CREATE_COMPANY, json!({ "input": payload }), &COMPANY_LISTS)
            .await?;

        tracing::info!("Empresa {} criada no place {}", data.create_company.id, payload.place_id);
        Ok(data.create_company)
    }

    async fn editable_company(&self, company_id: i64) -> Result<Company, AppError> {
        let user = self.manager()?;
        let company = self.company(company_id).await?;

        if !role_helpers::can_edit_company(&user, &company) {
            return Err(AppError::forbidden("alterar esta empresa"));
        }
        Ok(company)
    }

    pub async fn update_company(
        &self,
        company_id: i64,
        payload: &UpdateCompanyPayload,
    ) -> Result<Company, AppError> {
        payload.validate()?;
        self.editable_company(company_id).await?;

        let data: UpdateCompanyData = self
            .client
            .mutate(
                &operations::UPDATE_COMPANY,
                json!({ "id": company_id, "input": payload }),
                &[],
            )
            .await?;

        Ok(data.update_company)
    }

    pub async fn set_company_active(&self, company_id: i64, is_active: bool) -> Result<Company, AppError> {
        self.editable_company(company_id).await?;

        let data: SetCompanyActiveData = self
            .client
            .mutate(
                &operations::SET_COMPANY_ACTIVE,
                json!({ "id": company_id, "isActive": is_active }),
                &["dashboardStats"],
            )
            .await?;

        Ok(data.set_company_active)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        graphql::{transport::MockTransport, GraphQLError, GraphQLResponse},
        models::auth::RoleName::{self, *},
        services::role_helpers::fixtures::user,
        test_helpers::{client_with, context_for, tokens_with},
    };

    fn service(transport: MockTransport, roles: &[RoleName]) -> CompanyService {
        CompanyService::new(client_with(transport, tokens_with("tok")), context_for(user(roles, Some(7))))
    }

    fn company_json(id: i64, place_id: i64, name: &str) -> serde_json::Value {
        json!({ "__typename": "Company", "id": id, "name": name, "placeId": place_id, "isActive": true,
                "category": null, "subcategory": null })
    }

    fn create_payload(place_id: i64) -> CreateCompanyPayload {
        CreateCompanyPayload { name: "Padaria Central".into(), description: None, place_id }
    }

    #[tokio::test]
    async fn place_admin_creates_company_in_own_place() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .withf(|request, _| {
                request.operation_name == "CreateCompany" && request.variables["input"]["placeId"] == 7
            })
            .returning(|_, _| Ok(GraphQLResponse::ok(json!({ "createCompany": company_json(50, 7, "Padaria Central") }))));

        let company = service(transport, &[PlaceAdmin]).create_company(&create_payload(7)).await?;
        assert_eq!(company.id, 50);
        Ok(())
    }

    #[tokio::test]
    async fn place_admin_cannot_create_in_other_place() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let result = service(transport, &[PlaceAdmin]).create_company(&create_payload(9)).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn invalid_company_form_is_rejected_locally() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let payload = CreateCompanyPayload { name: "X".into(), description: None, place_id: 7 };
        let result = service(transport, &[SuperAdmin]).create_company(&payload).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn business_rule_errors_reach_the_form() {
        let mut transport = MockTransport::new();
        transport.expect_execute().returning(|_, _| {
            Ok(GraphQLResponse {
                data: None,
                errors: Some(vec![GraphQLError::new("Já existe uma empresa com esse nome")]),
            })
        });

        let result = service(transport, &[SuperAdmin]).create_company(&create_payload(7)).await;
        match result {
            Err(AppError::Client(e)) => assert_eq!(e.to_string(), "Já existe uma empresa com esse nome"),
            other => panic!("resultado inesperado: {:?}", other.map(|c| c.id)),
        }
    }

    #[tokio::test]
    async fn company_admin_cannot_edit_neighbour() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .withf(|request, _| request.operation_name == "GetCompany")
            .returning(|_, _| Ok(GraphQLResponse::ok(json!({ "company": company_json(4, 7, "Vizinha") }))));

        // O fixture não liga o admin a nenhuma empresa
        let result = service(transport, &[CompanyAdmin]).set_company_active(4, false).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn missing_company_is_not_found() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_, _| Ok(GraphQLResponse::ok(json!({ "company": null }))));

        let result = service(transport, &[SuperAdmin]).company(404).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_refreshes_the_cached_company() -> TestResult {
        let mut transport = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_execute()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(GraphQLResponse::ok(json!({ "company": company_json(4, 7, "Antigo") }))));
        transport
            .expect_execute()
            .once()
            .in_sequence(&mut seq)
            .withf(|request, _| request.operation_name == "UpdateCompany")
            .returning(|_, _| Ok(GraphQLResponse::ok(json!({ "updateCompany": company_json(4, 7, "Novo") }))));

        let companies = service(transport, &[PlaceAdmin]);
        let payload = UpdateCompanyPayload { name: Some("Novo".into()), description: None };
        companies.update_company(4, &payload).await?;

        // Servido pelo cache, já com o nome novo
        assert_eq!(companies.company(4).await?.name, "Novo");
        Ok(())
    }
}
