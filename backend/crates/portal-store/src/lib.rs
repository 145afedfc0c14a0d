pub mod error;
pub mod stores;

pub use error::{Result, StoreError};
pub use stores::catalog_cache::CatalogCache;
pub use stores::credential_store::CredentialStore;
pub use stores::user_store::{UpsertOutcome, UserStore};
