// src/graphql/transport.rs

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, header::HeaderMap};

use crate::graphql::{GraphQLRequest, GraphQLResponse, NetworkError};

/// O estágio de transporte: serializa a operação e devolve a troca crua.
///
/// Não faz retry nem impõe timeout além do padrão do cliente HTTP.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: GraphQLRequest,
        headers: HeaderMap,
    ) -> Result<GraphQLResponse, NetworkError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: GraphQLRequest,
        headers: HeaderMap,
    ) -> Result<GraphQLResponse, NetworkError> {
        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(NetworkError::Status { status, body });
        }

        Ok(response.json::<GraphQLResponse>().await?)
    }
}
