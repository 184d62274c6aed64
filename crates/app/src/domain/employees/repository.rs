//! Employees Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    companies::records::CompanyUuid,
    employees::{
        data::{EmployeeUpdate, NewEmployee},
        records::{EmployeeRecord, EmployeeUuid},
    },
};

const LIST_EMPLOYEES_SQL: &str = include_str!("sql/list_employees.sql");
const GET_EMPLOYEE_SQL: &str = include_str!("sql/get_employee.sql");
const CREATE_EMPLOYEE_SQL: &str = include_str!("sql/create_employee.sql");
const UPDATE_EMPLOYEE_SQL: &str = include_str!("sql/update_employee.sql");
const DELETE_EMPLOYEE_SQL: &str = include_str!("sql/delete_employee.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEmployeesRepository;

impl PgEmployeesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_employees(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(LIST_EMPLOYEES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_employee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee: EmployeeUuid,
    ) -> Result<EmployeeRecord, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(GET_EMPLOYEE_SQL)
            .bind(employee.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_employee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(CREATE_EMPLOYEE_SQL)
            .bind(employee.uuid.into_uuid())
            .bind(employee.full_name)
            .bind(employee.national_id)
            .bind(employee.email)
            .bind(employee.job_title)
            .bind(salary_to_i64(employee.base_salary)?)
            .bind(SqlxDate::from(employee.hired_on))
            .bind(employee.terminated_on.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_employee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee: EmployeeUuid,
        update: EmployeeUpdate,
    ) -> Result<EmployeeRecord, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(UPDATE_EMPLOYEE_SQL)
            .bind(employee.into_uuid())
            .bind(update.full_name)
            .bind(update.national_id)
            .bind(update.email)
            .bind(update.job_title)
            .bind(salary_to_i64(update.base_salary)?)
            .bind(SqlxDate::from(update.hired_on))
            .bind(update.terminated_on.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_employee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee: EmployeeUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_EMPLOYEE_SQL)
            .bind(employee.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn salary_to_i64(salary: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(salary).map_err(|e| sqlx::Error::ColumnDecode {
        index: "base_salary".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for EmployeeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let salary_i64: i64 = row.try_get("base_salary")?;

        let base_salary = u64::try_from(salary_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "base_salary".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: EmployeeUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            full_name: row.try_get("full_name")?,
            national_id: row.try_get("national_id")?,
            email: row.try_get("email")?,
            job_title: row.try_get("job_title")?,
            base_salary,
            hired_on: row.try_get::<SqlxDate, _>("hired_on")?.to_jiff(),
            terminated_on: row
                .try_get::<Option<SqlxDate>, _>("terminated_on")?
                .map(SqlxDate::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
