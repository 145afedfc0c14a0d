use crate::{CatalogClient, CatalogError, Folder, Result as CatalogErrorResult};
use crate::{chat_url, resolve_icon};

use portal_core::{Agent, Category};
use portal_store::CatalogCache;

use std::panic::Location;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSyncSummary {
    pub categories: usize,
    pub agents: usize,
}

/// Mirror the configured root folder into the local catalog cache.
///
/// The cache is only replaced once every category has been listed, so a
/// failed sync leaves the previous catalog in place.
pub async fn sync_catalog(
    client: &CatalogClient,
    cache: &CatalogCache,
) -> CatalogErrorResult<CatalogSyncSummary> {
    let root_name = &client.settings().root_folder;
    info!("Starting catalog sync (root folder \"{root_name}\")");

    let folders = client.folders().await?;
    let Some(root) = find_root_folder(&folders, root_name) else {
        let available = serde_json::to_string_pretty(&folders).unwrap_or_default();
        error!("Root folder \"{root_name}\" not found. Available folders: {available}");
        return Err(CatalogError::RootFolderNotFound {
            name: root_name.clone(),
            available,
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let category_folders = category_folders(&folders, root);
    info!("Found {} categories", category_folders.len());

    let mut categories = Vec::with_capacity(category_folders.len());
    let mut agents = 0;

    for folder in category_folders {
        let applications = client.applications(&folder.id).await?;
        info!(
            "Found {} apps in category \"{}\"",
            applications.len(),
            folder.name
        );

        let mut category = Category::new(folder.id.clone(), folder.name.clone());
        for app in applications {
            let icon = resolve_icon(
                client.base_url(),
                app.icon.as_deref(),
                app.icon_file_id.as_deref(),
            );
            debug!("Icon for {}: {:?} -> {icon:?}", app.name, app.icon);

            let url = resolve_chat_url(client, &app.id, &app.name).await;

            category.agents.push(Agent {
                id: app.id,
                title: app.name,
                description: app.desc.unwrap_or_default(),
                icon,
                url,
            });
        }

        agents += category.agents.len();
        categories.push(category);
    }

    cache.replace(&categories).await?;
    info!(
        "Catalog sync completed: {} categories, {agents} agents",
        categories.len()
    );

    Ok(CatalogSyncSummary {
        categories: categories.len(),
        agents,
    })
}

async fn resolve_chat_url(client: &CatalogClient, app_id: &str, app_name: &str) -> String {
    match client.access_token(app_id).await {
        Ok(Some(token)) => chat_url(client.base_url(), &token),
        Ok(None) => {
            warn!("No access token for app {app_name}, using fallback chat URL");
            chat_url(client.base_url(), app_id)
        }
        Err(e) => {
            warn!("Access token request for app {app_name} failed, using fallback chat URL: {e}");
            chat_url(client.base_url(), app_id)
        }
    }
}

/// The root folder at the top level, else one level into each top-level folder.
pub(crate) fn find_root_folder<'a>(folders: &'a [Folder], name: &str) -> Option<&'a Folder> {
    folders.iter().find(|f| f.name == name).or_else(|| {
        folders
            .iter()
            .flat_map(|f| f.children.iter())
            .find(|f| f.name == name)
    })
}

/// Category folders under `root`: its children, else folders naming it as
/// parent, else the root itself.
pub(crate) fn category_folders(folders: &[Folder], root: &Folder) -> Vec<Folder> {
    if !root.children.is_empty() {
        return root.children.clone();
    }

    let mut by_parent = Vec::new();
    collect_by_parent(folders, &root.id, &mut by_parent);
    if !by_parent.is_empty() {
        return by_parent;
    }

    debug!("No subfolders under \"{}\", using it as the only category", root.name);
    vec![root.clone()]
}

fn collect_by_parent(folders: &[Folder], parent_id: &str, out: &mut Vec<Folder>) {
    for folder in folders {
        if folder.parent_id.as_deref() == Some(parent_id) {
            out.push(folder.clone());
        }
        collect_by_parent(&folder.children, parent_id, out);
    }
}
