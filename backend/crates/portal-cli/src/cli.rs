use crate::commands::Commands;

use clap::Parser;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Agent portal administration CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, global = true, env = "PORTAL_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Session token (from `portal login`)
    #[arg(long, global = true, env = "PORTAL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
