// src/graphql/request.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Uma operação nomeada do schema publicado pelo servidor.
///
/// `root_fields` lista os campos de topo que o documento seleciona; o cache
/// usa essa lista para saber o que ler sem interpretar o documento.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
    pub root_fields: &'static [&'static str],
}

// O corpo que vai para o endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub operation_name: String,
    pub query: String,
    pub variables: Value,
}

impl GraphQLRequest {
    pub fn new(operation: &Operation, variables: Value) -> Self {
        Self {
            operation_name: operation.name.to_string(),
            query: operation.document.to_string(),
            variables,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse {
    pub fn ok(data: Value) -> Self {
        Self { data: Some(data), errors: None }
    }

    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

// Erro de aplicação (regra de negócio) vindo do servidor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Option<Vec<ErrorLocation>>,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = &self.path {
            let path: Vec<String> = path
                .iter()
                .map(|segment| match segment {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            write!(f, " (em {})", path.join("."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_uses_graphql_field_names() {
        let op = Operation {
            name: "Me",
            kind: OperationKind::Query,
            document: "query Me { me { id } }",
            root_fields: &["me"],
        };
        let body = serde_json::to_value(GraphQLRequest::new(&op, json!({}))).unwrap();

        assert_eq!(
            body,
            json!({ "operationName": "Me", "query": "query Me { me { id } }", "variables": {} })
        );
    }

    #[test]
    fn response_with_null_errors_parses() {
        let resp: GraphQLResponse =
            serde_json::from_value(json!({ "data": { "me": null }, "errors": null })).unwrap();
        assert!(resp.errors().is_empty());
    }

    #[test]
    fn error_display_includes_path() {
        let err: GraphQLError = serde_json::from_value(json!({
            "message": "Segmento não pertence ao place",
            "locations": [{ "line": 2, "column": 3 }],
            "path": ["assignCompanyToSegment", 0],
            "extensions": { "code": "BAD_USER_INPUT" }
        }))
        .unwrap();

        assert_eq!(err.to_string(), "Segmento não pertence ao place (em assignCompanyToSegment.0)");
        assert_eq!(err.code(), Some("BAD_USER_INPUT"));
    }
}
