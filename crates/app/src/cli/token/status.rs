use jiff::Timestamp;

use super::CompanyTokenArgs;

pub(crate) async fn run(args: CompanyTokenArgs) -> Result<(), String> {
    let (company, context) = args.connect().await?;

    let stored = context
        .connections
        .token_status(company)
        .await
        .map_err(|error| format!("failed to load token: {error}"))?;

    let Some(stored) = stored else {
        println!("company {company} has no stored token");
        return Ok(());
    };

    println!("realm_id: {}", stored.realm_id.as_deref().unwrap_or("-"));
    println!("token_type: {}", stored.grant.token_type);
    println!("access_expires_at: {}", stored.grant.expires_at);

    if let Some(expires_at) = stored.grant.refresh_token_expires_at {
        println!("refresh_expires_at: {expires_at}");
    }

    println!("updated_at: {}", stored.updated_at);
    println!("needs_refresh: {}", stored.needs_refresh(Timestamp::now()));

    Ok(())
}
