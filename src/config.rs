// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    graphql::{AuthLink, ErrorLink, GraphQLClient, HttpTransport, NormalizedCache, Transport, TypePolicies},
    middleware::navigation::PendingNavigation,
    services::{
        admin_service::AdminService, auth::{AuthContext, AuthService}, company_service::CompanyService,
        dashboard_service::DashboardService, segmentation_service::SegmentationService,
    },
    storage::{FileStorage, MemoryStorage, StorageBackend, TokenStorage},
};

pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:4000/graphql";
pub const DEFAULT_CONSOLE_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TOKEN_STORE_DIR: &str = ".console";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graphql_url: String,
    pub addr: SocketAddr,
    // `None` guarda o token só em memória
    pub token_store_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let graphql_url = env::var("GRAPHQL_URL").unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string());

        let addr = env::var("CONSOLE_ADDR").unwrap_or_else(|_| DEFAULT_CONSOLE_ADDR.to_string());
        let addr = addr
            .parse()
            .with_context(|| format!("CONSOLE_ADDR inválido: {}", addr))?;

        let token_store_dir = match env::var("TOKEN_STORE_DIR") {
            Ok(dir) if dir.trim().is_empty() => None,
            Ok(dir) => Some(PathBuf::from(dir)),
            Err(_) => Some(PathBuf::from(DEFAULT_TOKEN_STORE_DIR)),
        };

        Ok(Self { graphql_url, addr, token_store_dir })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub tokens: TokenStorage,
    pub navigation: Arc<PendingNavigation>,
    pub client: GraphQLClient,
    // Adicionamos os serviços ao estado
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub admin_service: AdminService,
    pub company_service: CompanyService,
    pub segmentation_service: SegmentationService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let storage: Arc<dyn StorageBackend> = match &config.token_store_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => Arc::new(MemoryStorage::new()),
        };
        let transport = Arc::new(HttpTransport::new(config.graphql_url.clone()));

        tracing::info!("✅ Cliente GraphQL apontando para {}", transport.endpoint());
        Ok(Self::build(config, storage, transport))
    }

    // --- Monta o gráfico de dependências ---
    pub fn build(config: AppConfig, storage: Arc<dyn StorageBackend>, transport: Arc<dyn Transport>) -> Self {
        let tokens = TokenStorage::new(storage);
        let navigation = Arc::new(PendingNavigation::new());

        let client = GraphQLClient::new(
            transport,
            AuthLink::new(tokens.clone()),
            ErrorLink::new(tokens.clone(), navigation.clone()),
            Arc::new(NormalizedCache::new(TypePolicies::console())),
        );

        let context = AuthContext::new();

        Self {
            auth_service: AuthService::new(client.clone(), tokens.clone(), context.clone()),
            dashboard_service: DashboardService::new(client.clone(), context.clone()),
            admin_service: AdminService::new(client.clone(), context.clone()),
            company_service: CompanyService::new(client.clone(), context.clone()),
            segmentation_service: SegmentationService::new(client.clone(), context),
            config,
            tokens,
            navigation,
            client,
        }
    }
}
