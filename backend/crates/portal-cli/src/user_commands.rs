use portal_core::Role;

use std::str::FromStr;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List every user record
    List,

    /// Change a user's role
    SetRole {
        /// User ID
        id: String,
        /// `admin` or `user`
        #[arg(value_parser = parse_role)]
        role: Role,
    },

    /// Replace a user's allowed apps (no apps clears the list)
    SetApps {
        /// User ID
        id: String,
        /// App IDs, comma separated
        #[arg(value_delimiter = ',')]
        apps: Vec<String>,
    },

    /// Set a new local password for a user
    ResetPassword {
        /// User ID (the local credential id)
        user_id: String,
        #[arg(long, env = "PORTAL_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::from_str(value).map_err(|_| format!("unknown role '{value}' (expected admin or user)"))
}
