pub mod agent;
pub mod category;
pub mod local_credential;
pub mod origin;
pub mod partial_user_record;
pub mod permission_update;
pub mod role;
pub mod user_record;

/// Collapse duplicate application ids, keeping the first occurrence.
pub(crate) fn dedupe_apps(apps: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    apps.into_iter()
        .filter(|app| seen.insert(app.clone()))
        .collect()
}
