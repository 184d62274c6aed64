//! Pay Runs Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    companies::records::CompanyUuid,
    employees::records::EmployeeUuid,
    pay_periods::{
        records::{PayPeriodUuid, PayRunItemRecord, PayRunItemUuid},
        totals::PayRunTotals,
    },
};

const LIST_PAY_RUN_ITEMS_SQL: &str = include_str!("../sql/list_pay_run_items.sql");
const CLEAR_PAY_RUN_ITEMS_SQL: &str = include_str!("../sql/clear_pay_run_items.sql");
const CREATE_PAY_RUN_ITEM_SQL: &str = include_str!("../sql/create_pay_run_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPayRunsRepository;

impl PgPayRunsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_pay_run_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayRunItemRecord>, sqlx::Error> {
        query_as::<Postgres, PayRunItemRecord>(LIST_PAY_RUN_ITEMS_SQL)
            .bind(period.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Replaces the period's run with freshly computed totals.
    pub(crate) async fn replace_pay_run(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
        totals: &[PayRunTotals],
    ) -> Result<Vec<PayRunItemRecord>, sqlx::Error> {
        query(CLEAR_PAY_RUN_ITEMS_SQL)
            .bind(period.into_uuid())
            .execute(&mut **tx)
            .await?;

        let mut items = Vec::with_capacity(totals.len());

        for total in totals {
            let item = query_as::<Postgres, PayRunItemRecord>(CREATE_PAY_RUN_ITEM_SQL)
                .bind(PayRunItemUuid::new().into_uuid())
                .bind(period.into_uuid())
                .bind(total.employee_uuid.into_uuid())
                .bind(total.earnings)
                .bind(total.extras)
                .bind(total.deductions)
                .bind(total.employer_contributions)
                .bind(total.net_pay)
                .fetch_one(&mut **tx)
                .await?;

            items.push(item);
        }

        Ok(items)
    }
}

impl<'r> FromRow<'r, PgRow> for PayRunItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PayRunItemUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            pay_period_uuid: PayPeriodUuid::from_uuid(row.try_get("pay_period_uuid")?),
            employee_uuid: EmployeeUuid::from_uuid(row.try_get("employee_uuid")?),
            earnings: row.try_get("earnings")?,
            extras: row.try_get("extras")?,
            deductions: row.try_get("deductions")?,
            employer_contributions: row.try_get("employer_contributions")?,
            net_pay: row.try_get("net_pay")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
