use planilla_app::domain::connections::records::RevokeOutcome;

use super::CompanyTokenArgs;

pub(crate) async fn run(args: CompanyTokenArgs) -> Result<(), String> {
    let (company, context) = args.connect().await?;

    let outcome = context
        .connections
        .disconnect(company)
        .await
        .map_err(|error| format!("failed to disconnect company: {error}"))?;

    println!("disconnected company {company}");

    match outcome {
        RevokeOutcome::Revoked => println!("refresh token revoked upstream"),
        RevokeOutcome::Failed => {
            println!("warning: upstream revoke failed; local tokens were removed anyway");
        }
        RevokeOutcome::NotConnected => println!("company had no stored token"),
    }

    Ok(())
}
