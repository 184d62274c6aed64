//! Pay Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    companies::records::CompanyUuid,
    pay_items::{
        data::{NewPayItem, PayItemUpdate},
        records::{PayItemKind, PayItemRecord, PayItemUuid},
    },
};

const LIST_PAY_ITEMS_SQL: &str = include_str!("sql/list_pay_items.sql");
const GET_PAY_ITEM_SQL: &str = include_str!("sql/get_pay_item.sql");
const CREATE_PAY_ITEM_SQL: &str = include_str!("sql/create_pay_item.sql");
const UPDATE_PAY_ITEM_SQL: &str = include_str!("sql/update_pay_item.sql");
const DELETE_PAY_ITEM_SQL: &str = include_str!("sql/delete_pay_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPayItemsRepository;

impl PgPayItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_pay_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PayItemRecord>, sqlx::Error> {
        query_as::<Postgres, PayItemRecord>(LIST_PAY_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_pay_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: PayItemUuid,
    ) -> Result<PayItemRecord, sqlx::Error> {
        query_as::<Postgres, PayItemRecord>(GET_PAY_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_pay_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewPayItem,
    ) -> Result<PayItemRecord, sqlx::Error> {
        query_as::<Postgres, PayItemRecord>(CREATE_PAY_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.code)
            .bind(item.name)
            .bind(item.kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_pay_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: PayItemUuid,
        update: PayItemUpdate,
    ) -> Result<PayItemRecord, sqlx::Error> {
        query_as::<Postgres, PayItemRecord>(UPDATE_PAY_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(update.code)
            .bind(update.name)
            .bind(update.kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_pay_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: PayItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PAY_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PayItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: &str = row.try_get("kind")?;

        let kind = kind
            .parse::<PayItemKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: PayItemUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            kind,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
