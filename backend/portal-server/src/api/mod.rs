pub mod auth;
pub mod catalog;
pub mod error;
pub mod extractors;
pub mod users;
