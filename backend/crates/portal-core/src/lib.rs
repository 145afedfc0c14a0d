pub mod access;
pub mod error;
pub mod models;

pub use access::visible_categories;
pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::agent::Agent;
pub use models::category::Category;
pub use models::local_credential::LocalCredential;
pub use models::origin::Origin;
pub use models::partial_user_record::PartialUserRecord;
pub use models::permission_update::PermissionUpdate;
pub use models::role::Role;
pub use models::user_record::UserRecord;

#[cfg(test)]
mod tests;
