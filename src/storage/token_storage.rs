// src/storage/token_storage.rs

use std::sync::Arc;

use crate::storage::StorageBackend;

/// Chave fixa onde o bearer token fica guardado.
pub const TOKEN_KEY: &str = "auth_token";

/// Guarda o bearer token da sessão.
///
/// Nunca falha para o chamador: erros de acesso ao armazenamento são
/// registrados e absorvidos, porque o console não tem o que fazer com eles.
/// Não há validação de formato nem de expiração; expiração só é descoberta
/// por um 401 do servidor.
#[derive(Clone)]
pub struct TokenStorage {
    backend: Arc<dyn StorageBackend>,
}

impl TokenStorage {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn get_token(&self) -> Option<String> {
        match self.backend.get_item(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Falha ao ler o token armazenado: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.backend.set_item(TOKEN_KEY, token) {
            tracing::error!("Falha ao salvar o token: {}", e);
        }
    }

    pub fn remove_token(&self) {
        if let Err(e) = self.backend.remove_item(TOKEN_KEY) {
            tracing::error!("Falha ao remover o token: {}", e);
        }
    }

    pub fn has_token(&self) -> bool {
        self.get_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::storage::MemoryStorage;

    struct BrokenStorage;

    impl StorageBackend for BrokenStorage {
        fn get_item(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::other("disco indisponível"))
        }
        fn set_item(&self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("disco indisponível"))
        }
        fn remove_item(&self, _key: &str) -> io::Result<()> {
            Err(io::Error::other("disco indisponível"))
        }
    }

    #[test]
    fn set_get_remove() {
        let storage = TokenStorage::new(Arc::new(MemoryStorage::new()));
        assert!(!storage.has_token());

        storage.set_token("jwt.token.value");
        assert_eq!(storage.get_token().as_deref(), Some("jwt.token.value"));
        assert!(storage.has_token());

        storage.remove_token();
        assert!(!storage.has_token());
    }

    #[test]
    fn storage_failures_are_absorbed() {
        let storage = TokenStorage::new(Arc::new(BrokenStorage));

        storage.set_token("x");
        storage.remove_token();
        assert_eq!(storage.get_token(), None);
        assert!(!storage.has_token());
    }

    #[test]
    fn token_is_not_validated() {
        let storage = TokenStorage::new(Arc::new(MemoryStorage::new()));
        storage.set_token("nem-parece-um-jwt");
        assert!(storage.has_token());
    }
}
