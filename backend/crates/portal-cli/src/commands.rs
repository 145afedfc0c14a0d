use crate::user_commands::UserCommands;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with a local account and print the session token
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the account the token belongs to
    Me,

    /// List the catalog categories visible to the caller
    Categories,

    /// Re-sync the catalog cache from the Catalog Service
    Sync,

    /// Reconcile users with the Catalog Service directory (admin)
    SyncUsers,

    /// User administration (admin)
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}
