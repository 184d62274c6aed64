use super::CompanyTokenArgs;

pub(crate) async fn run(args: CompanyTokenArgs) -> Result<(), String> {
    let (company, context) = args.connect().await?;

    let grant = context
        .connections
        .force_refresh(company)
        .await
        .map_err(|error| format!("failed to refresh token: {error}"))?;

    println!("refreshed token for company {company}");
    println!("access_expires_at: {}", grant.expires_at);

    Ok(())
}
