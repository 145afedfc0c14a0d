use crate::{CatalogClient, CatalogError, Result as CatalogErrorResult, RosterRecord};

use portal_core::{Origin, PartialUserRecord, UserRecord};
use portal_store::{UpsertOutcome, UserStore};

use std::collections::HashSet;
use std::panic::Location;

use error_location::ErrorLocation;
use log::{error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterSyncSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Upstream entries without an id
    pub skipped: usize,
}

/// Reconcile the user table with the Catalog Service's user directory.
///
/// Present entries are upserted by id without touching role or allow-list.
/// Catalog-sourced records that are no longer upstream are deleted, except
/// admins. An empty upstream roster aborts before anything is deleted.
pub async fn sync_user_roster(
    client: &CatalogClient,
    users: &UserStore,
) -> CatalogErrorResult<RosterSyncSummary> {
    info!("Starting user roster sync");

    let records = client.roster().await?;
    if records.is_empty() {
        error!("Catalog Service returned no users; roster sync aborted");
        return Err(CatalogError::EmptyRoster {
            location: ErrorLocation::from(Location::caller()),
        });
    }
    info!("Found {} users upstream", records.len());

    let mut summary = RosterSyncSummary::default();
    let mut present: HashSet<String> = HashSet::new();

    for raw in records {
        let record = RosterRecord::from_value(raw);
        let Some(id) = record.id.clone() else {
            warn!("Skipping roster entry without id: {}", record.raw);
            summary.skipped += 1;
            continue;
        };

        let (user, outcome) = users.upsert_detailed(to_partial(&id, record)).await?;
        match outcome {
            UpsertOutcome::Created => summary.created += 1,
            UpsertOutcome::Updated => summary.updated += 1,
        }

        // A username match keeps the local id
        present.insert(id);
        present.insert(user.id);
    }

    let removed = users
        .remove_where(|user| {
            is_catalog_sourced(user) && !user.is_admin() && !present.contains(&user.id)
        })
        .await?;
    for user in &removed {
        info!(
            "Deleted user {} ({}): no longer in the Catalog Service",
            user.username, user.id
        );
    }
    summary.deleted = removed.len();

    info!(
        "Roster sync completed: {} created, {} updated, {} deleted, {} skipped",
        summary.created, summary.updated, summary.deleted, summary.skipped
    );
    Ok(summary)
}

fn to_partial(id: &str, record: RosterRecord) -> PartialUserRecord {
    let origin = Origin::Catalog;
    let username = record.display_name().unwrap_or_else(|| id.to_string());

    let mut partial = PartialUserRecord::new()
        .with_id(id)
        .with_username(username)
        .with_email(record.email.unwrap_or_default())
        .with_origin(origin);
    if let Some(key) = origin.extension_key() {
        partial = partial.with_extension(key, record.raw);
    }
    partial
}

fn is_catalog_sourced(user: &UserRecord) -> bool {
    user.origin == Origin::Catalog
        || Origin::Catalog
            .extension_key()
            .is_some_and(|key| user.extensions.contains_key(key))
}
