//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use planilla_app::{
    context::AppContext,
    database::MockDatabaseHealth,
    domain::{
        catalog::MockCatalogService,
        companies::{
            MockCompaniesService,
            records::{CompanyRecord, CompanyUuid, PaySplit},
        },
        connections::MockConnectionsService,
        employees::{
            MockEmployeesService,
            records::{EmployeeRecord, EmployeeUuid},
        },
        pay_items::{
            MockPayItemsService,
            records::{PayItemKind, PayItemRecord, PayItemUuid},
        },
        pay_periods::{
            MockPayPeriodsService,
            records::{PayPeriodRecord, PayPeriodUuid},
        },
        profiles::MockCompanyProfilesService,
    },
};

use crate::{auth::ApiKeys, state::State};

pub(crate) const TEST_API_KEY: &str = "planilla-test-key";

pub(crate) const TEST_COMPANY_UUID: CompanyUuid = CompanyUuid::from_uuid(Uuid::nil());

/// One mock per service. A mock without expectations fails on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) database: MockDatabaseHealth,
    pub(crate) companies: MockCompaniesService,
    pub(crate) employees: MockEmployeesService,
    pub(crate) pay_items: MockPayItemsService,
    pub(crate) pay_periods: MockPayPeriodsService,
    pub(crate) profiles: MockCompanyProfilesService,
    pub(crate) connections: MockConnectionsService,
    pub(crate) catalog: MockCatalogService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            database: Arc::new(self.database),
            companies: Arc::new(self.companies),
            employees: Arc::new(self.employees),
            pay_items: Arc::new(self.pay_items),
            pay_periods: Arc::new(self.pay_periods),
            profiles: Arc::new(self.profiles),
            connections: Arc::new(self.connections),
            catalog: Arc::new(self.catalog),
        };

        let api_keys = ApiKeys::from_hex_digests(&[ApiKeys::digest_hex(TEST_API_KEY)])
            .unwrap_or_else(|error| unreachable!("test digest is valid: {error}"));

        State::from_app_context(app, api_keys)
    }

    /// Serves `route` with these mocks injected and no API key check.
    pub(crate) fn serve(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn strict_state() -> Arc<State> {
    Mocks::default().into_state()
}

pub(crate) fn make_company(uuid: CompanyUuid) -> CompanyRecord {
    CompanyRecord {
        uuid,
        name: "Soda La Esquina".to_string(),
        tax_id: "3-101-000001".to_string(),
        realm_id: None,
        payroll_policy: None,
        vacation_policy: None,
        pay_split: PaySplit::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_employee(uuid: EmployeeUuid) -> EmployeeRecord {
    EmployeeRecord {
        uuid,
        company_uuid: TEST_COMPANY_UUID,
        full_name: "María Rodríguez".to_string(),
        national_id: "1-1234-0567".to_string(),
        email: None,
        job_title: Some("Cocinera".to_string()),
        base_salary: 45_000_000,
        hired_on: date(2025, 1, 6),
        terminated_on: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_pay_item(uuid: PayItemUuid, kind: PayItemKind) -> PayItemRecord {
    PayItemRecord {
        uuid,
        company_uuid: TEST_COMPANY_UUID,
        code: kind.as_str().to_uppercase(),
        name: kind.as_str().to_string(),
        kind,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_pay_period(uuid: PayPeriodUuid) -> PayPeriodRecord {
    PayPeriodRecord {
        uuid,
        company_uuid: TEST_COMPANY_UUID,
        starts_on: date(2026, 9, 1),
        ends_on: date(2026, 9, 30),
        pay_date: date(2026, 9, 30),
        closed_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
