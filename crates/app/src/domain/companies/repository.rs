//! Companies Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::companies::{
    data::{CompanyUpdate, NewCompany},
    records::{CompanyRecord, CompanyUuid, PaySplit},
};

const LIST_COMPANIES_SQL: &str = include_str!("sql/list_companies.sql");
const GET_COMPANY_SQL: &str = include_str!("sql/get_company.sql");
const FIND_COMPANY_BY_REALM_SQL: &str = include_str!("sql/find_company_by_realm.sql");
const CREATE_COMPANY_SQL: &str = include_str!("sql/create_company.sql");
const UPDATE_COMPANY_SQL: &str = include_str!("sql/update_company.sql");
const SET_COMPANY_REALM_SQL: &str = include_str!("sql/set_company_realm.sql");
const DELETE_COMPANY_SQL: &str = include_str!("sql/delete_company.sql");
const DELETE_COMPANY_TOKENS_SQL: &str = include_str!("sql/delete_company_tokens.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed companies repository.
pub(crate) struct PgCompaniesRepository {
    pool: PgPool,
}

impl PgCompaniesRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    pub(crate) async fn list_companies(&self) -> Result<Vec<CompanyRecord>, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(LIST_COMPANIES_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(GET_COMPANY_SQL)
            .bind(company.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_company_by_realm(
        &self,
        realm_id: &str,
    ) -> Result<Option<CompanyRecord>, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(FIND_COMPANY_BY_REALM_SQL)
            .bind(realm_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(CREATE_COMPANY_SQL)
            .bind(company.uuid.into_uuid())
            .bind(company.name)
            .bind(company.tax_id)
            .bind(company.realm_id)
            .bind(company.payroll_policy)
            .bind(company.vacation_policy)
            .bind(i16::from(company.pay_split.first))
            .bind(i16::from(company.pay_split.second))
            .bind(i16::from(company.pay_split.third))
            .bind(i16::from(company.pay_split.fourth))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_company(
        &self,
        company: CompanyUuid,
        update: CompanyUpdate,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(UPDATE_COMPANY_SQL)
            .bind(company.into_uuid())
            .bind(update.name)
            .bind(update.tax_id)
            .bind(update.payroll_policy)
            .bind(update.vacation_policy)
            .bind(i16::from(update.pay_split.first))
            .bind(i16::from(update.pay_split.second))
            .bind(i16::from(update.pay_split.third))
            .bind(i16::from(update.pay_split.fourth))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn set_company_realm(
        &self,
        company: CompanyUuid,
        realm_id: Option<&str>,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(SET_COMPANY_REALM_SQL)
            .bind(company.into_uuid())
            .bind(realm_id)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn delete_company(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: CompanyUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COMPANY_SQL)
            .bind(company.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        query(DELETE_COMPANY_TOKENS_SQL)
            .bind(company.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CompanyRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CompanyUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            tax_id: row.try_get("tax_id")?,
            realm_id: row.try_get("realm_id")?,
            payroll_policy: row.try_get("payroll_policy")?,
            vacation_policy: row.try_get("vacation_policy")?,
            pay_split: PaySplit {
                first: percentage(row, "pay_split_first")?,
                second: percentage(row, "pay_split_second")?,
                third: percentage(row, "pay_split_third")?,
                fourth: percentage(row, "pay_split_fourth")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

fn percentage(row: &PgRow, column: &str) -> sqlx::Result<u8> {
    let value: i16 = row.try_get(column)?;

    u8::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
