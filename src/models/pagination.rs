// src/models/pagination.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Paginação por cursor no estilo Relay, como o servidor publica
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: Option<i64>,
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

// Argumentos de paginação vindos da query string das páginas
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageArgs {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub search: Option<String>,
}

impl PageArgs {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;

    pub fn page_size(&self) -> i64 {
        self.first.unwrap_or(Self::DEFAULT_PAGE_SIZE).clamp(1, 100)
    }
}
