//! Pay Events Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    companies::records::CompanyUuid,
    employees::records::EmployeeUuid,
    pay_items::records::{PayItemKind, PayItemUuid},
    pay_periods::{
        data::NewPayEvent,
        records::{PayEventRecord, PayEventUuid, PayPeriodUuid},
    },
};

const LIST_PAY_EVENTS_SQL: &str = include_str!("../sql/list_pay_events.sql");
const CREATE_PAY_EVENT_SQL: &str = include_str!("../sql/create_pay_event.sql");
const DELETE_PAY_EVENT_SQL: &str = include_str!("../sql/delete_pay_event.sql");
const GET_PAY_ITEM_KIND_SQL: &str = include_str!("../sql/get_pay_item_kind.sql");
const EMPLOYEE_EXISTS_SQL: &str = include_str!("../sql/employee_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPayEventsRepository;

impl PgPayEventsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_pay_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayEventRecord>, sqlx::Error> {
        query_as::<Postgres, PayEventRecord>(LIST_PAY_EVENTS_SQL)
            .bind(period.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Kind of a live pay item visible to the current company.
    pub(crate) async fn get_pay_item_kind(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: PayItemUuid,
    ) -> Result<Option<PayItemKind>, sqlx::Error> {
        let kind: Option<String> = query_scalar(GET_PAY_ITEM_KIND_SQL)
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        kind.map(|kind| parse_kind(&kind)).transpose()
    }

    /// Foreign keys ignore row-level security, so visibility is checked here.
    pub(crate) async fn employee_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee: EmployeeUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(EMPLOYEE_EXISTS_SQL)
            .bind(employee.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_pay_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
        kind: PayItemKind,
        event: NewPayEvent,
    ) -> Result<PayEventRecord, sqlx::Error> {
        query_as::<Postgres, PayEventRecord>(CREATE_PAY_EVENT_SQL)
            .bind(event.uuid.into_uuid())
            .bind(event.employee_uuid.into_uuid())
            .bind(period.into_uuid())
            .bind(event.pay_item_uuid.into_uuid())
            .bind(kind.as_str())
            .bind(kind.normalise_amount(event.amount))
            .bind(event.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_pay_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
        event: PayEventUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PAY_EVENT_SQL)
            .bind(event.into_uuid())
            .bind(period.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn parse_kind(kind: &str) -> Result<PayItemKind, sqlx::Error> {
    kind.parse::<PayItemKind>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for PayEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PayEventUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            employee_uuid: EmployeeUuid::from_uuid(row.try_get("employee_uuid")?),
            pay_period_uuid: PayPeriodUuid::from_uuid(row.try_get("pay_period_uuid")?),
            pay_item_uuid: PayItemUuid::from_uuid(row.try_get("pay_item_uuid")?),
            kind: parse_kind(row.try_get("kind")?)?,
            amount: row.try_get("amount")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
