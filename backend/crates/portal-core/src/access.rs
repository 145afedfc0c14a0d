//! Allow-list filtering of the cached catalog.

use crate::{Category, UserRecord};

/// Categories visible to `user`.
///
/// Admins see the full catalog. Other users see each category's agents
/// filtered to their allow-list; categories left empty are dropped.
pub fn visible_categories(categories: &[Category], user: &UserRecord) -> Vec<Category> {
    if user.is_admin() {
        return categories.to_vec();
    }

    categories
        .iter()
        .filter_map(|category| {
            let agents: Vec<_> = category
                .agents
                .iter()
                .filter(|agent| user.can_access_app(&agent.id))
                .cloned()
                .collect();

            (!agents.is_empty()).then(|| Category {
                id: category.id.clone(),
                name: category.name.clone(),
                agents,
            })
        })
        .collect()
}
