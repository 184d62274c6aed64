//! Pay periods service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        companies::records::CompanyUuid,
        pay_periods::{
            data::{NewPayEvent, NewPayPeriod, PayPeriodUpdate},
            errors::PayPeriodsServiceError,
            records::{
                PayEventRecord, PayEventUuid, PayPeriodRecord, PayPeriodUuid, PayRunItemRecord,
            },
            repositories::{PgPayEventsRepository, PgPayPeriodsRepository, PgPayRunsRepository},
            totals::summarize_events,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPayPeriodsService {
    db: Db,
    periods: PgPayPeriodsRepository,
    events: PgPayEventsRepository,
    runs: PgPayRunsRepository,
}

impl PgPayPeriodsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            periods: PgPayPeriodsRepository::new(),
            events: PgPayEventsRepository::new(),
            runs: PgPayRunsRepository::new(),
        }
    }

    async fn lock_open_period(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError> {
        let record = self.periods.lock_pay_period(tx, period).await?;

        if record.is_closed() {
            return Err(PayPeriodsServiceError::PeriodClosed);
        }

        Ok(record)
    }
}

fn ensure_period_dates(starts_on: Date, ends_on: Date) -> Result<(), PayPeriodsServiceError> {
    if ends_on < starts_on {
        return Err(PayPeriodsServiceError::InvalidData);
    }

    Ok(())
}

#[async_trait]
impl PayPeriodsService for PgPayPeriodsService {
    async fn list_pay_periods(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<PayPeriodRecord>, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let periods = self.periods.list_pay_periods(&mut tx).await?;

        tx.commit().await?;

        Ok(periods)
    }

    async fn get_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let period = self.periods.get_pay_period(&mut tx, period).await?;

        tx.commit().await?;

        Ok(period)
    }

    async fn create_pay_period(
        &self,
        company: CompanyUuid,
        period: NewPayPeriod,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError> {
        ensure_period_dates(period.starts_on, period.ends_on)?;

        let mut tx = self.db.begin_company_transaction(company).await?;

        let created = self.periods.create_pay_period(&mut tx, period).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
        update: PayPeriodUpdate,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError> {
        ensure_period_dates(update.starts_on, update.ends_on)?;

        let mut tx = self.db.begin_company_transaction(company).await?;

        self.lock_open_period(&mut tx, period).await?;

        let updated = self
            .periods
            .update_pay_period(&mut tx, period, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<(), PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.lock_open_period(&mut tx, period).await?;

        let rows_affected = self.periods.delete_pay_period(&mut tx, period).await?;

        if rows_affected == 0 {
            return Err(PayPeriodsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn close_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.lock_open_period(&mut tx, period).await?;

        let closed = self
            .periods
            .close_pay_period(&mut tx, period)
            .await?
            .ok_or(PayPeriodsServiceError::PeriodClosed)?;

        tx.commit().await?;

        Ok(closed)
    }

    async fn list_pay_events(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayEventRecord>, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.periods.get_pay_period(&mut tx, period).await?;

        let events = self.events.list_pay_events(&mut tx, period).await?;

        tx.commit().await?;

        Ok(events)
    }

    async fn create_pay_event(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
        event: NewPayEvent,
    ) -> Result<PayEventRecord, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.lock_open_period(&mut tx, period).await?;

        if !self.events.employee_exists(&mut tx, event.employee_uuid).await? {
            return Err(PayPeriodsServiceError::InvalidReference);
        }

        let kind = self
            .events
            .get_pay_item_kind(&mut tx, event.pay_item_uuid)
            .await?
            .ok_or(PayPeriodsServiceError::InvalidReference)?;

        let created = self
            .events
            .create_pay_event(&mut tx, period, kind, event)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_pay_event(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
        event: PayEventUuid,
    ) -> Result<(), PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.lock_open_period(&mut tx, period).await?;

        let rows_affected = self.events.delete_pay_event(&mut tx, period, event).await?;

        if rows_affected == 0 {
            return Err(PayPeriodsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_pay_run(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayRunItemRecord>, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.periods.get_pay_period(&mut tx, period).await?;

        let items = self.runs.list_pay_run_items(&mut tx, period).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn run_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayRunItemRecord>, PayPeriodsServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        self.lock_open_period(&mut tx, period).await?;

        let events = self.events.list_pay_events(&mut tx, period).await?;
        let totals = summarize_events(&events);

        let items = self.runs.replace_pay_run(&mut tx, period, &totals).await?;

        tx.commit().await?;

        Ok(items)
    }
}

#[automock]
#[async_trait]
/// Pay periods with their events and computed runs.
pub trait PayPeriodsService: Send + Sync {
    /// Lists live periods, most recent first.
    async fn list_pay_periods(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<PayPeriodRecord>, PayPeriodsServiceError>;

    async fn get_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError>;

    async fn create_pay_period(
        &self,
        company: CompanyUuid,
        period: NewPayPeriod,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError>;

    /// Changes an open period's dates.
    async fn update_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
        update: PayPeriodUpdate,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError>;

    /// Soft-deletes an open period.
    async fn delete_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<(), PayPeriodsServiceError>;

    /// Closes a period. Closing twice fails with `PeriodClosed`.
    async fn close_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<PayPeriodRecord, PayPeriodsServiceError>;

    async fn list_pay_events(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayEventRecord>, PayPeriodsServiceError>;

    /// Records a pay event, signing the amount from the pay item's kind.
    async fn create_pay_event(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
        event: NewPayEvent,
    ) -> Result<PayEventRecord, PayPeriodsServiceError>;

    async fn delete_pay_event(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
        event: PayEventUuid,
    ) -> Result<(), PayPeriodsServiceError>;

    /// Returns the last computed run for the period.
    async fn get_pay_run(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayRunItemRecord>, PayPeriodsServiceError>;

    /// Recomputes the period's run from its events.
    async fn run_pay_period(
        &self,
        company: CompanyUuid,
        period: PayPeriodUuid,
    ) -> Result<Vec<PayRunItemRecord>, PayPeriodsServiceError>;
}
