//! Companies service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::companies::{
    data::{CompanyUpdate, NewCompany},
    errors::CompaniesServiceError,
    records::{CompanyRecord, CompanyUuid, PaySplit},
    repository::PgCompaniesRepository,
};

#[derive(Debug, Clone)]
pub struct PgCompaniesService {
    repository: PgCompaniesRepository,
}

impl PgCompaniesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgCompaniesRepository::new(pool),
        }
    }
}

fn ensure_balanced(split: PaySplit) -> Result<(), CompaniesServiceError> {
    if split.is_balanced() {
        Ok(())
    } else {
        Err(CompaniesServiceError::InvalidPaySplit(split.total()))
    }
}

#[async_trait]
impl CompaniesService for PgCompaniesService {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, CompaniesServiceError> {
        self.repository
            .list_companies()
            .await
            .map_err(Into::into)
    }

    async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        self.repository
            .get_company(company)
            .await
            .map_err(Into::into)
    }

    async fn find_company_by_realm(
        &self,
        realm_id: &str,
    ) -> Result<Option<CompanyRecord>, CompaniesServiceError> {
        self.repository
            .find_company_by_realm(realm_id)
            .await
            .map_err(Into::into)
    }

    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        ensure_balanced(company.pay_split)?;

        self.repository
            .create_company(company)
            .await
            .map_err(Into::into)
    }

    async fn update_company(
        &self,
        company: CompanyUuid,
        update: CompanyUpdate,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        ensure_balanced(update.pay_split)?;

        self.repository
            .update_company(company, update)
            .await
            .map_err(Into::into)
    }

    async fn delete_company(&self, company: CompanyUuid) -> Result<(), CompaniesServiceError> {
        let mut tx = self.repository.begin().await?;

        let rows_affected = self.repository.delete_company(&mut tx, company).await?;

        if rows_affected == 0 {
            return Err(CompaniesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn set_realm(
        &self,
        company: CompanyUuid,
        realm_id: Option<String>,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        self.repository
            .set_company_realm(company, realm_id.as_deref())
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Company (tenant) persistence operations.
pub trait CompaniesService: Send + Sync {
    /// Lists live companies ordered by name.
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, CompaniesServiceError>;

    /// Retrieves a single live company.
    async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Finds the live company currently linked to a QuickBooks realm.
    async fn find_company_by_realm(
        &self,
        realm_id: &str,
    ) -> Result<Option<CompanyRecord>, CompaniesServiceError>;

    /// Creates a company. The pay split must total 100.
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Replaces a company's editable fields. The pay split must total 100.
    async fn update_company(
        &self,
        company: CompanyUuid,
        update: CompanyUpdate,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Soft-deletes a company and forgets its stored OAuth tokens.
    async fn delete_company(&self, company: CompanyUuid) -> Result<(), CompaniesServiceError>;

    /// Links the company to a realm, or unlinks it with `None`.
    async fn set_realm(
        &self,
        company: CompanyUuid,
        realm_id: Option<String>,
    ) -> Result<CompanyRecord, CompaniesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, new_company};

    use super::*;

    #[tokio::test]
    async fn create_company_returns_persisted_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CompanyUuid::new();

        let company = ctx
            .companies
            .create_company(NewCompany {
                uuid,
                ..new_company("Soda La Esquina", "3-101-000001")
            })
            .await?;

        assert_eq!(company.uuid, uuid);
        assert_eq!(company.name, "Soda La Esquina");
        assert_eq!(company.pay_split, PaySplit::default());
        assert!(company.realm_id.is_none());
        assert!(company.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_company_rejects_unbalanced_split_before_touching_storage() -> TestResult {
        let pool = PgPool::connect_lazy("postgres://unused@localhost/unused")?;
        let service = PgCompaniesService::new(pool);

        let result = service
            .create_company(NewCompany {
                pay_split: PaySplit {
                    first: 50,
                    second: 40,
                    third: 0,
                    fourth: 0,
                },
                ..new_company("Ferretería Central", "3-101-000002")
            })
            .await;

        assert!(
            matches!(result, Err(CompaniesServiceError::InvalidPaySplit(90))),
            "expected InvalidPaySplit(90), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_tax_id_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.companies
            .create_company(new_company("First", "3-101-000003"))
            .await?;

        let result = ctx
            .companies
            .create_company(new_company("Second", "3-101-000003"))
            .await;

        assert!(
            matches!(result, Err(CompaniesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_realm_links_and_find_by_realm_resolves() -> TestResult {
        let ctx = TestContext::new().await;

        let company = ctx
            .companies
            .create_company(new_company("Linked", "3-101-000004"))
            .await?;

        ctx.companies
            .set_realm(company.uuid, Some("9130350000000001".to_string()))
            .await?;

        let found = ctx
            .companies
            .find_company_by_realm("9130350000000001")
            .await?;

        assert_eq!(found.map(|c| c.uuid), Some(company.uuid));

        let unlinked = ctx.companies.set_realm(company.uuid, None).await?;

        assert!(unlinked.realm_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_company_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let company = ctx
            .companies
            .create_company(new_company("Short Lived", "3-101-000005"))
            .await?;

        ctx.companies.delete_company(company.uuid).await?;

        let result = ctx.companies.get_company(company.uuid).await;

        assert!(
            matches!(result, Err(CompaniesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let again = ctx.companies.delete_company(company.uuid).await;

        assert!(
            matches!(again, Err(CompaniesServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }
}
