use clap::Args;
use planilla_app::{
    database,
    domain::companies::{
        CompaniesService, PgCompaniesService,
        data::NewCompany,
        records::{CompanyUuid, PaySplit},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCompanyArgs {
    /// Company display name
    #[arg(long)]
    name: String,

    /// Legal tax identifier
    #[arg(long)]
    tax_id: String,

    /// QuickBooks realm id to link immediately
    #[arg(long)]
    realm_id: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional company UUID; generated when omitted
    #[arg(long)]
    company_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateCompanyArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCompaniesService::new(pool);

    let company = service
        .create_company(NewCompany {
            uuid: args
                .company_uuid
                .map_or_else(CompanyUuid::new, CompanyUuid::from_uuid),
            name: args.name,
            tax_id: args.tax_id,
            realm_id: args.realm_id,
            payroll_policy: None,
            vacation_policy: None,
            pay_split: PaySplit::default(),
        })
        .await
        .map_err(|error| format!("failed to create company: {error}"))?;

    println!("company_uuid: {}", company.uuid);
    println!("company_name: {}", company.name);

    if let Some(realm_id) = company.realm_id {
        println!("realm_id: {realm_id}");
    }

    Ok(())
}
