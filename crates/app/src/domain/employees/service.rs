//! Employees service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        companies::records::CompanyUuid,
        employees::{
            data::{EmployeeUpdate, NewEmployee},
            errors::EmployeesServiceError,
            records::{EmployeeRecord, EmployeeUuid},
            repository::PgEmployeesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgEmployeesService {
    db: Db,
    repository: PgEmployeesRepository,
}

impl PgEmployeesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgEmployeesRepository::new(),
        }
    }
}

fn ensure_employment_dates(
    hired_on: Date,
    terminated_on: Option<Date>,
) -> Result<(), EmployeesServiceError> {
    match terminated_on {
        Some(terminated_on) if terminated_on < hired_on => Err(EmployeesServiceError::InvalidData),
        _ => Ok(()),
    }
}

#[async_trait]
impl EmployeesService for PgEmployeesService {
    async fn list_employees(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<EmployeeRecord>, EmployeesServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let employees = self.repository.list_employees(&mut tx).await?;

        tx.commit().await?;

        Ok(employees)
    }

    async fn get_employee(
        &self,
        company: CompanyUuid,
        employee: EmployeeUuid,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let employee = self.repository.get_employee(&mut tx, employee).await?;

        tx.commit().await?;

        Ok(employee)
    }

    async fn create_employee(
        &self,
        company: CompanyUuid,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        ensure_employment_dates(employee.hired_on, employee.terminated_on)?;

        let mut tx = self.db.begin_company_transaction(company).await?;

        let created = self.repository.create_employee(&mut tx, employee).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_employee(
        &self,
        company: CompanyUuid,
        employee: EmployeeUuid,
        update: EmployeeUpdate,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        ensure_employment_dates(update.hired_on, update.terminated_on)?;

        let mut tx = self.db.begin_company_transaction(company).await?;

        let updated = self
            .repository
            .update_employee(&mut tx, employee, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_employee(
        &self,
        company: CompanyUuid,
        employee: EmployeeUuid,
    ) -> Result<(), EmployeesServiceError> {
        let mut tx = self.db.begin_company_transaction(company).await?;

        let rows_affected = self.repository.delete_employee(&mut tx, employee).await?;

        if rows_affected == 0 {
            return Err(EmployeesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EmployeesService: Send + Sync {
    /// Lists the company's live employees.
    async fn list_employees(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<EmployeeRecord>, EmployeesServiceError>;

    /// Retrieves a single employee.
    async fn get_employee(
        &self,
        company: CompanyUuid,
        employee: EmployeeUuid,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Hires a new employee.
    async fn create_employee(
        &self,
        company: CompanyUuid,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Replaces an employee's details.
    async fn update_employee(
        &self,
        company: CompanyUuid,
        employee: EmployeeUuid,
        update: EmployeeUpdate,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Soft-deletes an employee.
    async fn delete_employee(
        &self,
        company: CompanyUuid,
        employee: EmployeeUuid,
    ) -> Result<(), EmployeesServiceError>;
}
