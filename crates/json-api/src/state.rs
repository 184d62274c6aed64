//! State

use std::sync::Arc;

use planilla_app::context::AppContext;

use crate::auth::ApiKeys;

#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) api_keys: ApiKeys,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, api_keys: ApiKeys) -> Self {
        Self { app, api_keys }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, api_keys: ApiKeys) -> Arc<Self> {
        Arc::new(Self::new(app, api_keys))
    }
}
