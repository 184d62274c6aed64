//! App Router

use salvo::Router;

use crate::{
    auth, catalog, companies, connections, employees, pay_items, pay_periods, profiles,
};

/// Routes the QuickBooks consent screen redirects back to. No API key.
pub fn oauth_router() -> Router {
    Router::with_path("auth/callback").get(connections::callback::handler)
}

/// Everything behind the API key.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("auth/connect").get(connections::connect::handler))
        .push(
            Router::with_path("pending-connections/{token}")
                .get(connections::pending::handler)
                .push(Router::with_path("confirm").post(connections::confirm::handler)),
        )
        .push(
            Router::with_path("companies")
                .get(companies::index::handler)
                .post(companies::create::handler)
                .push(company_router()),
        )
}

fn company_router() -> Router {
    Router::with_path("{company}")
        .get(companies::get::handler)
        .put(companies::update::handler)
        .delete(companies::delete::handler)
        .push(Router::with_path("disconnect").post(connections::disconnect::handler))
        .push(
            Router::with_path("profile")
                .get(profiles::get::handler)
                .put(profiles::update::handler),
        )
        .push(Router::with_path("accounts").get(catalog::accounts::handler))
        .push(Router::with_path("tax-rates").get(catalog::tax_rates::handler))
        .push(Router::with_path("sales-summary").get(catalog::sales_summary::handler))
        .push(
            Router::with_path("employees")
                .get(employees::index::handler)
                .post(employees::create::handler)
                .push(
                    Router::with_path("{employee}")
                        .get(employees::get::handler)
                        .put(employees::update::handler)
                        .delete(employees::delete::handler),
                ),
        )
        .push(
            Router::with_path("pay-items")
                .get(pay_items::index::handler)
                .post(pay_items::create::handler)
                .push(
                    Router::with_path("{item}")
                        .get(pay_items::get::handler)
                        .put(pay_items::update::handler)
                        .delete(pay_items::delete::handler),
                ),
        )
        .push(
            Router::with_path("pay-periods")
                .get(pay_periods::index::handler)
                .post(pay_periods::create::handler)
                .push(pay_period_router()),
        )
}

fn pay_period_router() -> Router {
    Router::with_path("{period}")
        .get(pay_periods::get::handler)
        .put(pay_periods::update::handler)
        .delete(pay_periods::delete::handler)
        .push(Router::with_path("close").post(pay_periods::close::handler))
        .push(
            Router::with_path("events")
                .get(pay_periods::events::index::handler)
                .post(pay_periods::events::create::handler)
                .push(
                    Router::with_path("{event}").delete(pay_periods::events::delete::handler),
                ),
        )
        .push(
            Router::with_path("run")
                .get(pay_periods::run::get::handler)
                .post(pay_periods::run::create::handler),
        )
}
