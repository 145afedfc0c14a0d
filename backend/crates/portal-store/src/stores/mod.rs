pub mod catalog_cache;
pub mod credential_store;
pub mod user_store;

mod json_file;
