//! portal - agent portal administration CLI
//!
//! # Examples
//!
//! ```bash
//! # Get a token
//! export PORTAL_TOKEN=$(portal login -u admin -p '...' | jq -r .token)
//!
//! # Grant two agents to a user
//! portal users set-apps cas-tim ag1,ag2 --pretty
//! ```

use portal_cli::{Cli, Client, Commands, UserCommands};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let client = Client::new(&cli.server, cli.token.as_deref());

    let result = match cli.command {
        Commands::Login { username, password } => client.login(&username, &password).await,
        Commands::Me => client.me().await,
        Commands::Categories => client.categories().await,
        Commands::Sync => client.sync_catalog().await,
        Commands::SyncUsers => client.sync_users().await,
        Commands::Users { action } => match action {
            UserCommands::List => client.list_users().await,
            UserCommands::SetRole { id, role } => client.set_role(&id, role).await,
            UserCommands::SetApps { id, apps } => client.set_apps(&id, &apps).await,
            UserCommands::ResetPassword {
                user_id,
                new_password,
            } => client.reset_password(&user_id, &new_password).await,
        },
    };

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
