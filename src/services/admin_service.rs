// src/services/admin_service.rs

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    graphql::{operations, FetchPolicy, GraphQLClient},
    models::{
        auth::{RoleName, User},
        pagination::{Connection, PageArgs},
        tenancy::{CreateOrganizationPayload, CreatePlacePayload, Organization, Place},
    },
    services::{auth::AuthContext, role_helpers},
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AssignRolePayload {
    pub role: RoleName,
}

#[derive(Deserialize)]
struct UsersData {
    users: Connection<User>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignRoleData {
    assign_role: User,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveRoleData {
    remove_role: User,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetUserActiveData {
    set_user_active: User,
}

#[derive(Deserialize)]
struct OrganizationsData {
    organizations: Vec<Organization>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrganizationData {
    create_organization: Organization,
}

#[derive(Deserialize)]
struct PlacesData {
    places: Vec<Place>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePlaceData {
    create_place: Place,
}

// Página de administração: usuários, papéis, organizações e places
#[derive(Clone)]
pub struct AdminService {
    client: GraphQLClient,
    context: AuthContext,
}

impl AdminService {
    pub fn new(client: GraphQLClient, context: AuthContext) -> Self {
        Self { client, context }
    }

    fn user_allowed(&self, check: fn(&User) -> bool, action: &str) -> Result<User, AppError> {
        let user = self.context.require_user()?;
        if !check(&user) {
            return Err(AppError::forbidden(action));
        }
        Ok(user)
    }

    // Se a mutation mexeu no próprio operador, o contexto passa a refletir o servidor
    fn sync_session(&self, actor: &User, updated: &User) {
        if actor.id == updated.id {
            tracing::info!("Dados do operador {} mudaram; sessão atualizada.", actor.id);
            self.context.set_user(updated.clone());
        }
    }

    /// Lista paginada. Sem `after` lê do cache; com `after` busca a próxima
    /// página e a devolve já anexada às anteriores.
    pub async fn list_users(&self, args: &PageArgs) -> Result<Connection<User>, AppError> {
        self.user_allowed(role_helpers::can_manage_users, "gerenciar usuários")?;

        let policy = match args.after {
            Some(_) => FetchPolicy::NetworkOnly,
            None => FetchPolicy::CacheFirst,
        };
        let variables = json!({
            "first": args.page_size(),
            "after": args.after,
            "search": args.search,
        });

        let data: UsersData = self.client.query(&operations::GET_USERS, variables, policy).await?;
        Ok(data.users)
    }

    pub async fn assign_role(&self, user_id: i64, payload: &AssignRolePayload) -> Result<User, AppError> {
        let actor = self.user_allowed(role_helpers::can_manage_users, "gerenciar usuários")?;

        // Só quem já é Super Admin concede Super Admin
        if payload.role == RoleName::SuperAdmin && !role_helpers::is_super_admin(&actor) {
            return Err(AppError::forbidden("conceder o papel SUPER_ADMIN"));
        }

        let data: AssignRoleData = self
            .client
            .mutate(
                &operations::ASSIGN_ROLE,
                json!({ "userId": user_id, "role": payload.role }),
                &["users"],
            )
            .await?;

        tracing::info!("Papel {} concedido ao usuário {}", payload.role.as_str(), user_id);
        self.sync_session(&actor, &data.assign_role);
        Ok(data.assign_role)
    }

    pub async fn remove_role(&self, user_role_id: i64) -> Result<User, AppError> {
        let actor = self.user_allowed(role_helpers::can_manage_users, "gerenciar usuários")?;

        let data: RemoveRoleData = self
            .client
            .mutate(&operations::REMOVE_ROLE, json!({ "userRoleId": user_role_id }), &["users"])
            .await?;

        self.sync_session(&actor, &data.remove_role);
        Ok(data.remove_role)
    }

    // Não invalida nada: a entidade normalizada atualiza todas as listas
    pub async fn set_user_active(&self, user_id: i64, is_active: bool) -> Result<User, AppError> {
        let actor = self.user_allowed(role_helpers::can_manage_users, "gerenciar usuários")?;

        if actor.id == user_id && !is_active {
            return Err(AppError::forbidden("desativar a própria conta"));
        }

        let data: SetUserActiveData = self
            .client
            .mutate(
                &operations::SET_USER_ACTIVE,
                json!({ "userId": user_id, "isActive": is_active }),
                &[],
            )
            .await?;

        self.sync_session(&actor, &data.set_user_active);
        Ok(data.set_user_active)
    }

    pub async fn organizations(&self) -> Result<Vec<Organization>, AppError> {
        self.user_allowed(role_helpers::can_access_admin, "acessar a administração")?;

        let data: OrganizationsData = self
            .client
            .query(&operations::GET_ORGANIZATIONS, json!({}), FetchPolicy::CacheFirst)
            .await?;

        Ok(data.organizations)
    }

    pub async fn create_organization(
        &self,
        payload: &CreateOrganizationPayload,
    ) -> Result<Organization, AppError> {
        payload.validate()?;
        self.user_allowed(role_helpers::can_manage_organizations, "criar organizações")?;

        let data: CreateOrganizationData = self
            .client
            .mutate(
                &operations::CREATE_ORGANIZATION,
                json!({ "input": payload }),
                &["organizations", "dashboardStats"],
            )
            .await?;

        Ok(data.create_organization)
    }

    /// Places de uma organização. Um admin de organização sem filtro
    /// explícito vê a própria.
    pub async fn places(&self, organization_id: Option<i64>) -> Result<Vec<Place>, AppError> {
        let user = self.user_allowed(role_helpers::can_access_admin, "acessar a administração")?;

        let organization_id = match organization_id {
            Some(id) => Some(id),
            None if role_helpers::is_organization_admin(&user) && !role_helpers::is_super_admin(&user) => {
                user.organization_id
            }
            None => None,
        };

        let data: PlacesData = self
            .client
            .query(
                &operations::GET_PLACES,
                json!({ "organizationId": organization_id }),
                FetchPolicy::CacheFirst,
            )
            .await?;

        Ok(data.places)
    }

    pub async fn create_place(&self, payload: &CreatePlacePayload) -> Result<Place, AppError> {
        payload.validate()?;
        let user = self.user_allowed(role_helpers::can_manage_places, "criar places")?;

        if !role_helpers::is_super_admin(&user) && user.organization_id != Some(payload.organization_id) {
            return Err(AppError::forbidden("criar places fora da sua organização"));
        }

        let data: CreatePlaceData = self
            .client
            .mutate(&operations::CREATE_PLACE, json!({ "input": payload }), &["places", "dashboardStats"])
            .await?;

        Ok(data.create_place)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use testresult::TestResult;

    use super::*;
    use crate::{
        graphql::{transport::MockTransport, GraphQLResponse},
        models::auth::RoleName::*,
        services::role_helpers::fixtures::user,
        test_helpers::{client_with, context_for, tokens_with},
    };

    fn users_page(ids: &[i64], start: &str, end: &str) -> GraphQLResponse {
        GraphQLResponse::ok(json!({
            "users": {
                "edges": ids.iter().map(|id| json!({
                    "cursor": format!("c{}", id),
                    "node": { "__typename": "User", "id": id, "email": format!("u{}@x.com", id) }
                })).collect::<Vec<Value>>(),
                "pageInfo": { "startCursor": start, "endCursor": end, "hasNextPage": true, "hasPreviousPage": false },
                "totalCount": 4
            }
        }))
    }

    fn service(transport: MockTransport, roles: &[RoleName]) -> AdminService {
        AdminService::new(client_with(transport, tokens_with("tok")), context_for(user(roles, Some(7))))
    }

    #[tokio::test]
    async fn fetching_more_appends_to_the_first_page() -> TestResult {
        let mut transport = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_execute()
            .once()
            .in_sequence(&mut seq)
            .withf(|request, _| request.variables["after"].is_null())
            .returning(|_, _| Ok(users_page(&[1, 2], "c1", "c2")));
        transport
            .expect_execute()
            .once()
            .in_sequence(&mut seq)
            .withf(|request, _| request.variables["after"] == "c2")
            .returning(|_, _| Ok(users_page(&[3, 4], "c3", "c4")));

        let admin = service(transport, &[SuperAdmin]);

        let first = admin.list_users(&PageArgs::default()).await?;
        assert_eq!(first.edges.len(), 2);

        let more = admin
            .list_users(&PageArgs { after: Some("c2".into()), ..PageArgs::default() })
            .await?;
        let ids: Vec<i64> = more.nodes().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        // Voltar à primeira página não vai à rede
        let again = admin.list_users(&PageArgs::default()).await?;
        assert_eq!(again.edges.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn company_staff_cannot_list_users() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let result = service(transport, &[CompanyStaff]).list_users(&PageArgs::default()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn only_super_admin_grants_super_admin() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let result = service(transport, &[PlaceAdmin])
            .assign_role(10, &AssignRolePayload { role: SuperAdmin })
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn assign_role_sends_schema_literal() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .withf(|request, _| request.variables == json!({ "userId": 10, "role": "COMPANY_ADMIN" }))
            .returning(|_, _| {
                Ok(GraphQLResponse::ok(json!({
                    "assignRole": { "__typename": "User", "id": 10, "email": "x@y.com",
                                    "userRoles": [{ "id": 3, "isActive": true, "role": { "id": 4, "name": "COMPANY_ADMIN" } }] }
                })))
            });

        let updated = service(transport, &[PlaceAdmin])
            .assign_role(10, &AssignRolePayload { role: CompanyAdmin })
            .await?;

        assert!(role_helpers::is_company_admin(&updated));
        Ok(())
    }

    #[tokio::test]
    async fn removing_own_role_updates_the_session() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .withf(|request, _| request.operation_name == "RemoveRole")
            .returning(|_, _| {
                Ok(GraphQLResponse::ok(json!({
                    "removeRole": { "__typename": "User", "id": 1, "email": "operador@marketplace.com", "userRoles": [] }
                })))
            });

        let admin = service(transport, &[SuperAdmin]);
        let updated = admin.remove_role(1).await?;

        assert!(updated.user_roles.is_empty());
        let session = admin.context.require_user()?;
        assert!(!role_helpers::is_super_admin(&session));
        assert!(!role_helpers::can_access_admin(&session));
        Ok(())
    }

    #[tokio::test]
    async fn changing_another_user_keeps_the_session() -> TestResult {
        let mut transport = MockTransport::new();
        transport.expect_execute().once().returning(|_, _| {
            Ok(GraphQLResponse::ok(json!({
                "setUserActive": { "__typename": "User", "id": 10, "email": "outro@marketplace.com", "isActive": false }
            })))
        });

        let admin = service(transport, &[SuperAdmin]);
        admin.set_user_active(10, false).await?;

        let session = admin.context.require_user()?;
        assert_eq!(session.id, 1);
        assert!(role_helpers::is_super_admin(&session));
        Ok(())
    }

    #[tokio::test]
    async fn operator_cannot_deactivate_self() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        // O fixture cria o operador com id 1
        let result = service(transport, &[SuperAdmin]).set_user_active(1, false).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn organization_admin_sees_own_places_by_default() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .once()
            .withf(|request, _| request.variables["organizationId"] == 1)
            .returning(|_, _| {
                Ok(GraphQLResponse::ok(json!({
                    "places": [{ "__typename": "Place", "id": 7, "name": "Centro", "organizationId": 1, "isActive": true }]
                })))
            });

        let places = service(transport, &[OrganizationAdmin]).places(None).await?;
        assert_eq!(places[0].id, 7);
        Ok(())
    }

    #[tokio::test]
    async fn create_place_outside_own_organization_is_refused() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let payload = CreatePlacePayload { name: "Zona Norte".into(), description: None, organization_id: 99 };
        let result = service(transport, &[OrganizationAdmin]).create_place(&payload).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
