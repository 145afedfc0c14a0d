//! portal-cli library
//!
//! Exports the HTTP client and the command definitions for the `portal` binary.

pub mod cli;
pub mod client;
pub mod commands;
pub mod user_commands;

#[cfg(test)]
mod tests;

pub use cli::{Cli, DEFAULT_SERVER_URL};
pub use client::{CliClientResult, Client, ClientError};
pub use commands::Commands;
pub use user_commands::UserCommands;
