//! Agent Catalog Service integration: HTTP client, icon and chat URL
//! resolution, catalog sync and user-roster sync.

pub mod catalog_client;
pub mod catalog_sync;
pub mod error;
pub mod icon;
pub mod roster_sync;
pub mod wire;

pub use catalog_client::CatalogClient;
pub use catalog_sync::{CatalogSyncSummary, sync_catalog};
pub use error::{CatalogError, Result};
pub use icon::{chat_url, resolve_icon};
pub use roster_sync::{RosterSyncSummary, sync_user_roster};
pub use wire::{Application, Folder, RosterRecord};
