use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct CompanyCommand {
    #[command(subcommand)]
    command: CompanySubcommand,
}

#[derive(Debug, Subcommand)]
enum CompanySubcommand {
    Create(create::CreateCompanyArgs),
}

pub(crate) async fn run(command: CompanyCommand) -> Result<(), String> {
    match command.command {
        CompanySubcommand::Create(args) => create::run(args).await,
    }
}
