//! Database administration commands. These connect with the URL given on
//! the command line, not the API's runtime role.

use clap::{Args, Subcommand};

mod check_role;
mod ensure_app_role;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Create or update the least-privileged role the API connects as
    EnsureAppRole(ensure_app_role::EnsureAppRoleArgs),

    /// Verify a connection string cannot bypass company isolation
    CheckRole(check_role::CheckRoleArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::EnsureAppRole(args) => ensure_app_role::run(args).await,
        DbSubcommand::CheckRole(args) => check_role::run(args).await,
    }
}
