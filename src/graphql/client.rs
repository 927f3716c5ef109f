// src/graphql/client.rs

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::graphql::{
    AuthLink, ClientError, ErrorLink, GraphQLRequest, NormalizedCache, Operation, Transport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Usa o cache quando todos os campos de topo estão lá.
    #[default]
    CacheFirst,
    /// Sempre vai à rede e mescla o resultado no cache.
    NetworkOnly,
}

/// O pipeline autenticado: auth link → transporte → error link, mais o cache.
#[derive(Clone)]
pub struct GraphQLClient {
    transport: Arc<dyn Transport>,
    auth_link: AuthLink,
    error_link: ErrorLink,
    cache: Arc<NormalizedCache>,
}

impl GraphQLClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        auth_link: AuthLink,
        error_link: ErrorLink,
        cache: Arc<NormalizedCache>,
    ) -> Self {
        Self { transport, auth_link, error_link, cache }
    }

    pub fn cache(&self) -> &NormalizedCache {
        &self.cache
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
        policy: FetchPolicy,
    ) -> Result<T, ClientError> {
        if policy == FetchPolicy::CacheFirst {
            if let Some(cached) = self.cache.read_query(operation, &variables) {
                tracing::debug!("{} servido pelo cache.", operation.name);
                return Ok(serde_json::from_value(cached)?);
            }
        }

        let data = self.execute(operation, &variables).await?;
        self.cache.write_query(&variables, &data);

        // Devolve o que ficou no cache, já com as páginas mescladas
        let merged = self.cache.read_query(operation, &variables).unwrap_or(data);
        Ok(serde_json::from_value(merged)?)
    }

    /// Executa a mutation, atualiza as entidades normalizadas e remove os
    /// campos de topo em `evict` para que a próxima leitura busque de novo.
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
        evict: &[&str],
    ) -> Result<T, ClientError> {
        let data = self.execute(operation, &variables).await?;

        self.cache.write_entities(&data);
        for field in evict {
            let removed = self.cache.evict_field(field);
            tracing::debug!("{}: {} balde(s) de '{}' invalidado(s).", operation.name, removed, field);
        }

        Ok(serde_json::from_value(data)?)
    }

    async fn execute(&self, operation: &Operation, variables: &Value) -> Result<Value, ClientError> {
        let request = GraphQLRequest::new(operation, variables.clone());
        let headers = self.auth_link.headers();

        tracing::debug!("Executando {:?} {}", operation.kind, operation.name);
        let outcome = self.transport.execute(request, headers).await;
        self.error_link.inspect(operation.name, &outcome);

        let response = outcome?;
        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            return Err(ClientError::GraphQL(errors));
        }

        response.data.ok_or(ClientError::MissingData(operation.name))
    }
}
