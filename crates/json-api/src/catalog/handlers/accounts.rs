//! Chart of Accounts Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planilla_app::quickbooks::models::Account;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    /// QuickBooks account id
    pub id: String,

    pub name: String,
    pub fully_qualified_name: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub account_sub_type: Option<String>,
    pub classification: Option<String>,
    pub current_balance: Option<f64>,
    pub active: bool,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            fully_qualified_name: account.fully_qualified_name,
            account_number: account.acct_num,
            account_type: account.account_type,
            account_sub_type: account.account_sub_type,
            classification: account.classification,
            current_balance: account.current_balance,
            active: account.active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountsResponse {
    pub accounts: Vec<AccountResponse>,
}

/// Chart of Accounts Handler
///
/// Reads the connected company's accounts from QuickBooks.
#[endpoint(
    tags("catalog"),
    summary = "List QuickBooks Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Accounts"),
        (status_code = StatusCode::NOT_FOUND, description = "Company is not connected"),
        (status_code = StatusCode::BAD_GATEWAY, description = "QuickBooks request failed"),
    ),
)]
pub(crate) async fn handler(
    company: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AccountsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let accounts = state
        .app
        .catalog
        .accounts(company.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(AccountsResponse {
        accounts: accounts.into_iter().map(Into::into).collect(),
    }))
}
