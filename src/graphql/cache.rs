// src/graphql/cache.rs

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use serde_json::{Map, Value};

use crate::{graphql::Operation, models::pagination::Connection};

const REF_KEY: &str = "__ref";
const TYPENAME_KEY: &str = "__typename";

// Profundidade máxima ao reconstruir referências (há ciclos, ex: user → company → users)
const MAX_DENORMALIZE_DEPTH: usize = 16;

// Argumentos que só movem a janela da paginação
const PAGINATION_ARGS: [&str; 4] = ["first", "after", "last", "before"];

/// Como um campo de topo combina o valor novo com o que já está no cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergePolicy {
    /// Substitui pelo último valor recebido (padrão para listas).
    Replace,
    /// Paginação por cursor, um "balde" por combinação de `key_args`.
    CursorPaginated { key_args: Vec<&'static str> },
}

#[derive(Debug, Clone, Default)]
pub struct TypePolicies {
    fields: HashMap<&'static str, MergePolicy>,
}

impl TypePolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, policy: MergePolicy) -> Self {
        self.fields.insert(name, policy);
        self
    }

    pub fn policy_for(&self, field: &str) -> &MergePolicy {
        static REPLACE: MergePolicy = MergePolicy::Replace;
        self.fields.get(field).unwrap_or(&REPLACE)
    }

    /// As políticas dos campos que o console consome.
    pub fn console() -> Self {
        Self::new()
            .field(
                "users",
                MergePolicy::CursorPaginated { key_args: vec!["search", "placeId", "companyId"] },
            )
            .field(
                "companies",
                MergePolicy::CursorPaginated { key_args: vec!["placeId", "search"] },
            )
    }
}

/// Junta uma página nova a um balde existente.
///
/// Se os cursores de início e fim da página recebida são iguais (página
/// degenerada, ex: filtros mudaram) o balde é substituído. Caso contrário as
/// arestas novas vão depois das existentes, na ordem do servidor, sem
/// deduplicar. O `pageInfo` passa a ser o da página recebida.
pub fn merge_cursor_page<T>(existing: Option<Connection<T>>, incoming: Connection<T>) -> Connection<T> {
    let Some(mut merged) = existing else {
        return incoming;
    };

    if incoming.page_info.start_cursor == incoming.page_info.end_cursor {
        return incoming;
    }

    merged.edges.extend(incoming.edges);
    merged.page_info = incoming.page_info;
    merged.total_count = incoming.total_count.or(merged.total_count);
    merged
}

#[derive(Debug, Default)]
struct CacheStore {
    // "Typename:id" → campos da entidade (já normalizados)
    entities: HashMap<String, Map<String, Value>>,
    // "campo(args)" → valor do campo de topo (com referências)
    root: HashMap<String, Value>,
}

/// Cache normalizado em memória, compartilhado por todas as operações.
///
/// Não há serialização entre operações concorrentes: cada escrita aplica a
/// política de merge do campo e a última resposta a chegar vence.
#[derive(Debug)]
pub struct NormalizedCache {
    policies: TypePolicies,
    store: RwLock<CacheStore>,
}

impl NormalizedCache {
    pub fn new(policies: TypePolicies) -> Self {
        Self {
            policies,
            store: RwLock::new(CacheStore::default()),
        }
    }

    /// Lê todos os campos de topo da operação; `None` se faltar algum.
    pub fn read_query(&self, operation: &Operation, variables: &Value) -> Option<Value> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        let mut data = Map::new();

        for field in operation.root_fields {
            let key = self.storage_key(field, variables);
            let value = store.root.get(&key)?;
            data.insert(field.to_string(), denormalize(&store, value, 0));
        }

        Some(Value::Object(data))
    }

    /// Escreve o resultado de uma query aplicando as políticas de merge.
    pub fn write_query(&self, variables: &Value, data: &Value) {
        let Some(fields) = data.as_object() else {
            return;
        };

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);

        for (field, value) in fields {
            let key = self.storage_key(field, variables);
            let incoming = normalize(&mut store, value);

            let merged = match self.policies.policy_for(field) {
                MergePolicy::Replace => incoming,
                MergePolicy::CursorPaginated { .. } => {
                    merge_cursor_value(store.root.get(&key), incoming)
                }
            };

            store.root.insert(key, merged);
        }
    }

    /// Só atualiza as entidades (resultado de mutation).
    pub fn write_entities(&self, data: &Value) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        normalize(&mut store, data);
    }

    #[cfg(test)]
    pub fn read_entity(&self, typename: &str, id: &Value) -> Option<Value> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        let key = entity_key(typename, id)?;
        let entity = store.entities.get(&key)?;
        Some(denormalize(&store, &Value::Object(entity.clone()), 0))
    }

    /// Remove todos os baldes de um campo de topo; a próxima leitura vai à rede.
    pub fn evict_field(&self, field: &str) -> usize {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let before = store.root.len();
        let prefix = format!("{}(", field);
        store.root.retain(|key, _| key != field && !key.starts_with(&prefix));
        before - store.root.len()
    }

    pub fn reset(&self) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.entities.clear();
        store.root.clear();
        tracing::debug!("Cache GraphQL limpo.");
    }

    fn storage_key(&self, field: &str, variables: &Value) -> String {
        let empty = Map::new();
        let variables = variables.as_object().unwrap_or(&empty);

        // Map do serde_json é ordenado, então o JSON sai canônico
        let args: Map<String, Value> = match self.policies.policy_for(field) {
            MergePolicy::Replace => variables
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            MergePolicy::CursorPaginated { key_args } => variables
                .iter()
                .filter(|(k, v)| {
                    key_args.contains(&k.as_str())
                        && !PAGINATION_ARGS.contains(&k.as_str())
                        && !v.is_null()
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        if args.is_empty() {
            field.to_string()
        } else {
            format!("{}({})", field, Value::Object(args))
        }
    }
}

fn merge_cursor_value(existing: Option<&Value>, incoming: Value) -> Value {
    let Some(existing) = existing else {
        return incoming;
    };

    let parsed = (
        serde_json::from_value::<Connection<Value>>(existing.clone()),
        serde_json::from_value::<Connection<Value>>(incoming.clone()),
    );

    match parsed {
        (Ok(existing), Ok(page)) => match serde_json::to_value(merge_cursor_page(Some(existing), page)) {
            Ok(merged) => merged,
            Err(e) => {
                tracing::warn!("Falha ao serializar página mesclada: {}", e);
                incoming
            }
        },
        _ => {
            tracing::warn!("Campo paginado sem formato de Connection; substituindo.");
            incoming
        }
    }
}

fn entity_key(typename: &str, id: &Value) -> Option<String> {
    match id {
        Value::String(id) => Some(format!("{}:{}", typename, id)),
        Value::Number(id) => Some(format!("{}:{}", typename, id)),
        _ => None,
    }
}

fn identify(object: &Map<String, Value>) -> Option<String> {
    let typename = object.get(TYPENAME_KEY)?.as_str()?;
    entity_key(typename, object.get("id")?)
}

// Troca cada objeto identificável por {"__ref": "Typename:id"}
fn normalize(store: &mut CacheStore, value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| normalize(store, item)).collect()),
        Value::Object(object) => {
            let mut fields = Map::with_capacity(object.len());
            for (name, child) in object {
                fields.insert(name.clone(), normalize(store, child));
            }

            match identify(object) {
                Some(key) => {
                    // Campos novos sobrescrevem, os ausentes permanecem
                    store.entities.entry(key.clone()).or_default().extend(fields);
                    let mut reference = Map::new();
                    reference.insert(REF_KEY.to_string(), Value::String(key));
                    Value::Object(reference)
                }
                None => Value::Object(fields),
            }
        }
        other => other.clone(),
    }
}

fn denormalize(store: &CacheStore, value: &Value, depth: usize) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| denormalize(store, item, depth)).collect()),
        Value::Object(object) => {
            if let Some(Value::String(key)) = object.get(REF_KEY) {
                if depth >= MAX_DENORMALIZE_DEPTH {
                    return Value::Null;
                }
                return match store.entities.get(key) {
                    Some(entity) => denormalize(store, &Value::Object(entity.clone()), depth + 1),
                    None => Value::Null,
                };
            }

            Value::Object(
                object
                    .iter()
                    .map(|(name, child)| (name.clone(), denormalize(store, child, depth)))
                    .collect(),
            )
        }
        other => other.clone(),
    }
}
