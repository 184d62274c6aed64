use clap::Args;
use planilla_app::database::{self, RlsRoleError};

#[derive(Debug, Args)]
pub(crate) struct CheckRoleArgs {
    /// Connection string the API runs with
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CheckRoleArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match database::ensure_rls_enforced_role(&pool).await {
        Ok(()) => {
            println!("role is subject to row-level security");

            Ok(())
        }
        Err(RlsRoleError::BypassesRls) => Err(
            "role bypasses row-level security; run `db ensure-app-role` and connect as that role"
                .to_string(),
        ),
        Err(error) => Err(format!("failed to check role: {error}")),
    }
}
