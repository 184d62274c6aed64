use clap::{Args, Subcommand};
use planilla_app::{
    context::AppContext, database, domain::companies::records::CompanyUuid,
    quickbooks::QuickBooksArgs,
};
use uuid::Uuid;

mod disconnect;
mod refresh;
mod status;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Show the stored QuickBooks token for a company
    Status(CompanyTokenArgs),

    /// Refresh the access token now, regardless of expiry
    Refresh(CompanyTokenArgs),

    /// Revoke and forget the company's tokens
    Disconnect(CompanyTokenArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CompanyTokenArgs {
    /// Company UUID
    #[arg(long)]
    company: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(flatten)]
    quickbooks: QuickBooksArgs,
}

impl CompanyTokenArgs {
    async fn connect(self) -> Result<(CompanyUuid, AppContext), String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        let context = AppContext::new(pool, self.quickbooks.into_config())
            .map_err(|error| format!("failed to initialise services: {error}"))?;

        Ok((CompanyUuid::from_uuid(self.company), context))
    }
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Status(args) => status::run(args).await,
        TokenSubcommand::Refresh(args) => refresh::run(args).await,
        TokenSubcommand::Disconnect(args) => disconnect::run(args).await,
    }
}
