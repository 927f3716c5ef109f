pub mod backend;
pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub mod token_storage;
pub use token_storage::TokenStorage;
