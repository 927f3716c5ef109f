// src/services/dashboard_service.rs

use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError,
    graphql::{operations, FetchPolicy, GraphQLClient},
    models::dashboard::{DashboardStats, DashboardView},
    services::{auth::AuthContext, role_helpers},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsData {
    dashboard_stats: DashboardStats,
}

#[derive(Clone)]
pub struct DashboardService {
    client: GraphQLClient,
    context: AuthContext,
}

impl DashboardService {
    pub fn new(client: GraphQLClient, context: AuthContext) -> Self {
        Self { client, context }
    }

    // Os contadores são sempre rebuscados ao abrir o dashboard
    pub async fn summary(&self) -> Result<DashboardView, AppError> {
        let user = self.context.require_user()?;

        let data: StatsData = self
            .client
            .query(&operations::DASHBOARD_STATS, json!({}), FetchPolicy::NetworkOnly)
            .await?;

        Ok(DashboardView {
            capabilities: role_helpers::capabilities(&user),
            stats: data.dashboard_stats,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        graphql::{transport::MockTransport, GraphQLResponse},
        models::auth::RoleName,
        services::role_helpers::fixtures::user,
        test_helpers::{client_with, context_for, tokens_with},
    };

    #[tokio::test]
    async fn summary_combines_stats_and_capabilities() -> TestResult {
        let mut transport = MockTransport::new();
        transport.expect_execute().once().returning(|_, _| {
            Ok(GraphQLResponse::ok(json!({
                "dashboardStats": { "organizations": 2, "places": 5, "companies": 40, "users": 120,
                                    "companiesWithoutSegmentation": 6 }
            })))
        });

        let service = DashboardService::new(
            client_with(transport, tokens_with("tok")),
            context_for(user(&[RoleName::PlaceAdmin], Some(7))),
        );

        let view = service.summary().await?;

        assert_eq!(view.stats.companies, 40);
        assert_eq!(view.stats.companies_without_segmentation, 6);
        assert!(view.capabilities.can_manage_segmentation);
        assert!(!view.capabilities.can_manage_organizations);
        Ok(())
    }

    #[tokio::test]
    async fn summary_requires_a_loaded_user() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();

        let service = DashboardService::new(client_with(transport, tokens_with("tok")), AuthContext::new());

        assert!(matches!(service.summary().await, Err(AppError::Unauthenticated)));
    }
}
