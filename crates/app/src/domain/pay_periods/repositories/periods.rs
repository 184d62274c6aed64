//! Pay Periods Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    companies::records::CompanyUuid,
    pay_periods::{
        data::{NewPayPeriod, PayPeriodUpdate},
        records::{PayPeriodRecord, PayPeriodUuid},
    },
};

const LIST_PAY_PERIODS_SQL: &str = include_str!("../sql/list_pay_periods.sql");
const GET_PAY_PERIOD_SQL: &str = include_str!("../sql/get_pay_period.sql");
const LOCK_PAY_PERIOD_SQL: &str = include_str!("../sql/lock_pay_period.sql");
const CREATE_PAY_PERIOD_SQL: &str = include_str!("../sql/create_pay_period.sql");
const UPDATE_PAY_PERIOD_SQL: &str = include_str!("../sql/update_pay_period.sql");
const CLOSE_PAY_PERIOD_SQL: &str = include_str!("../sql/close_pay_period.sql");
const DELETE_PAY_PERIOD_SQL: &str = include_str!("../sql/delete_pay_period.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPayPeriodsRepository;

impl PgPayPeriodsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_pay_periods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PayPeriodRecord>, sqlx::Error> {
        query_as::<Postgres, PayPeriodRecord>(LIST_PAY_PERIODS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_pay_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, sqlx::Error> {
        query_as::<Postgres, PayPeriodRecord>(GET_PAY_PERIOD_SQL)
            .bind(period.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Loads the period with a row lock held until the transaction ends.
    pub(crate) async fn lock_pay_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, sqlx::Error> {
        query_as::<Postgres, PayPeriodRecord>(LOCK_PAY_PERIOD_SQL)
            .bind(period.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_pay_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: NewPayPeriod,
    ) -> Result<PayPeriodRecord, sqlx::Error> {
        query_as::<Postgres, PayPeriodRecord>(CREATE_PAY_PERIOD_SQL)
            .bind(period.uuid.into_uuid())
            .bind(SqlxDate::from(period.starts_on))
            .bind(SqlxDate::from(period.ends_on))
            .bind(SqlxDate::from(period.pay_date))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_pay_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
        update: PayPeriodUpdate,
    ) -> Result<PayPeriodRecord, sqlx::Error> {
        query_as::<Postgres, PayPeriodRecord>(UPDATE_PAY_PERIOD_SQL)
            .bind(period.into_uuid())
            .bind(SqlxDate::from(update.starts_on))
            .bind(SqlxDate::from(update.ends_on))
            .bind(SqlxDate::from(update.pay_date))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn close_pay_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<Option<PayPeriodRecord>, sqlx::Error> {
        query_as::<Postgres, PayPeriodRecord>(CLOSE_PAY_PERIOD_SQL)
            .bind(period.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_pay_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PAY_PERIOD_SQL)
            .bind(period.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PayPeriodRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PayPeriodUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            starts_on: row.try_get::<SqlxDate, _>("starts_on")?.to_jiff(),
            ends_on: row.try_get::<SqlxDate, _>("ends_on")?.to_jiff(),
            pay_date: row.try_get::<SqlxDate, _>("pay_date")?.to_jiff(),
            closed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("closed_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
