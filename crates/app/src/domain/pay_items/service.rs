//! Pay items service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        companies::records::CompanyUuid,
        pay_items::{
            data::{NewPayItem, PayItemUpdate},
            errors::PayItemsServiceError,
            records::{PayItemRecord, PayItemUuid},
            repository::PgPayItemsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPayItemsService {
    db: Db,
    repository: PgPayItemsRepository,
}

impl PgPayItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPayItemsRepository::new(),
        }
    }
}

#[async_trait]
impl PayItemsService for PgPayItemsService {
    async fn list_pay_items(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<PayItemRecord>, PayItemsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let items = self.repository.list_pay_items(&mut tx).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_pay_item(
        &self,
        company: CompanyUuid,
        item: PayItemUuid,
    ) -> Result<PayItemRecord, PayItemsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let item = self.repository.get_pay_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_pay_item(
        &self,
        company: CompanyUuid,
        item: NewPayItem,
    ) -> Result<PayItemRecord, PayItemsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let created = self.repository.create_pay_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_pay_item(
        &self,
        company: CompanyUuid,
        item: PayItemUuid,
        update: PayItemUpdate,
    ) -> Result<PayItemRecord, PayItemsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let updated = self
            .repository
            .update_pay_item(&mut tx, item, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_pay_item(
        &self,
        company: CompanyUuid,
        item: PayItemUuid,
    ) -> Result<(), PayItemsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let rows_affected = self.repository.delete_pay_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(PayItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PayItemsService: Send + Sync {
    /// Lists the company's live pay items ordered by code.
    async fn list_pay_items(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<PayItemRecord>, PayItemsServiceError>;

    /// Retrieves a single pay item.
    async fn get_pay_item(
        &self,
        company: CompanyUuid,
        item: PayItemUuid,
    ) -> Result<PayItemRecord, PayItemsServiceError>;

    /// Creates a pay item.
    async fn create_pay_item(
        &self,
        company: CompanyUuid,
        item: NewPayItem,
    ) -> Result<PayItemRecord, PayItemsServiceError>;

    /// Replaces a pay item's code, name and kind.
    async fn update_pay_item(
        &self,
        company: CompanyUuid,
        item: PayItemUuid,
        update: PayItemUpdate,
    ) -> Result<PayItemRecord, PayItemsServiceError>;

    /// Soft-deletes a pay item.
    async fn delete_pay_item(
        &self,
        company: CompanyUuid,
        item: PayItemUuid,
    ) -> Result<(), PayItemsServiceError>;
}
