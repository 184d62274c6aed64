//! Connections service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::{
        companies::{
            CompaniesService,
            data::NewCompany,
            records::{CompanyRecord, CompanyUuid, PaySplit},
        },
        connections::{
            errors::ConnectionsServiceError,
            pending::PendingConnectionsStore,
            records::{
                AUTHORIZATION_STATE_TTL, AccessGrant, AuthorizationOutcome, ConfirmPending,
                NewPendingConnection, PendingConnection, RevokeOutcome, StoredToken,
            },
            states::AuthorizationStateStore,
            tokens::TokenStore,
        },
    },
    quickbooks::{
        catalog::CatalogClient,
        oauth::{OAuthExchange, TokenGrant},
        state::{OAuthState, StateError, generate_correlation_token},
    },
};

/// Collaborators of [`QuickBooksConnectionsService`].
pub struct ConnectionsDeps {
    pub companies: Arc<dyn CompaniesService>,
    pub tokens: Arc<dyn TokenStore>,
    pub states: Arc<dyn AuthorizationStateStore>,
    pub pending: Arc<dyn PendingConnectionsStore>,
    pub oauth: Arc<dyn OAuthExchange>,
    pub catalog: Arc<dyn CatalogClient>,

    /// Lifetime of a parked connection.
    pub pending_ttl: SignedDuration,
}

/// OAuth lifecycle backed by the token and pending connection stores.
#[derive(Clone)]
pub struct QuickBooksConnectionsService {
    companies: Arc<dyn CompaniesService>,
    tokens: Arc<dyn TokenStore>,
    states: Arc<dyn AuthorizationStateStore>,
    pending: Arc<dyn PendingConnectionsStore>,
    oauth: Arc<dyn OAuthExchange>,
    catalog: Arc<dyn CatalogClient>,
    pending_ttl: SignedDuration,
}

impl std::fmt::Debug for QuickBooksConnectionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickBooksConnectionsService")
            .field("pending_ttl", &self.pending_ttl)
            .finish_non_exhaustive()
    }
}

impl QuickBooksConnectionsService {
    #[must_use]
    pub fn new(deps: ConnectionsDeps) -> Self {
        Self {
            companies: deps.companies,
            tokens: deps.tokens,
            states: deps.states,
            pending: deps.pending,
            oauth: deps.oauth,
            catalog: deps.catalog,
            pending_ttl: deps.pending_ttl,
        }
    }

    async fn attach(
        &self,
        company: &CompanyRecord,
        realm_id: &str,
        grant: &TokenGrant,
    ) -> Result<(), ConnectionsServiceError> {
        // A realm owned by another company is rejected here, before any token is written.
        self.companies
            .set_realm(company.uuid, Some(realm_id.to_string()))
            .await?;

        if let Err(error) = self.tokens.save_token(company.uuid, grant).await {
            self.restore_realm(company).await;

            return Err(error.into());
        }

        info!(company = %company.uuid, realm_id, "connected company to quickbooks");

        Ok(())
    }

    async fn restore_realm(&self, company: &CompanyRecord) {
        if let Err(error) = self
            .companies
            .set_realm(company.uuid, company.realm_id.clone())
            .await
        {
            warn!(company = %company.uuid, %error, "failed to restore the previous realm");
        }
    }

    async fn park(
        &self,
        realm_id: &str,
        return_path: String,
        grant: TokenGrant,
    ) -> Result<String, ConnectionsServiceError> {
        let company_name = match self
            .catalog
            .company_info(realm_id, &grant.access_token)
            .await
        {
            Ok(info) => Some(info.company_name),
            Err(error) => {
                warn!(realm_id, %error, "could not fetch quickbooks company name");
                None
            }
        };

        let expires_at = Timestamp::now()
            .checked_add(self.pending_ttl)
            .unwrap_or(Timestamp::MAX);

        let parked = self
            .pending
            .put(NewPendingConnection {
                token: generate_correlation_token(),
                realm_id: realm_id.to_string(),
                company_name,
                return_path,
                grant,
                expires_at,
            })
            .await?;

        info!(realm_id, "parked connection for an unknown realm");

        Ok(parked.token)
    }
}

#[async_trait]
impl ConnectionsService for QuickBooksConnectionsService {
    async fn authorization_url(
        &self,
        return_path: &str,
        company: Option<CompanyUuid>,
    ) -> Result<String, ConnectionsServiceError> {
        let state = OAuthState::new(return_path, company)?;
        let url = self.oauth.authorization_url(&state.encode()?)?;

        let expires_at = Timestamp::now()
            .checked_add(AUTHORIZATION_STATE_TTL)
            .unwrap_or(Timestamp::MAX);

        self.states.issue(&state, expires_at).await?;

        Ok(url)
    }

    async fn complete_authorization(
        &self,
        code: &str,
        state: &str,
        realm_id: &str,
    ) -> Result<AuthorizationOutcome, ConnectionsServiceError> {
        let presented = OAuthState::decode(state)?;

        if realm_id.trim().is_empty() {
            return Err(ConnectionsServiceError::MissingRealm);
        }

        let state = self
            .states
            .redeem(&presented.nonce)
            .await?
            .filter(|issued| *issued == presented)
            .ok_or(StateError::Unrecognized)
            .inspect_err(|_| warn!(realm_id, "callback state was not issued here"))?;

        let grant = self.oauth.exchange_code(code).await.inspect_err(|error| {
            warn!(realm_id, %error, "authorization code exchange failed");
        })?;

        if let Some(company) = state.company {
            let record = self.companies.get_company(company).await?;
            self.attach(&record, realm_id, &grant).await?;

            return Ok(AuthorizationOutcome::Connected {
                company,
                return_path: state.return_path,
            });
        }

        if let Some(existing) = self.companies.find_company_by_realm(realm_id).await? {
            self.tokens.save_token(existing.uuid, &grant).await?;

            info!(company = %existing.uuid, realm_id, "reconnected company to quickbooks");

            return Ok(AuthorizationOutcome::Connected {
                company: existing.uuid,
                return_path: state.return_path,
            });
        }

        let token = self
            .park(realm_id, state.return_path.clone(), grant)
            .await?;

        Ok(AuthorizationOutcome::Pending {
            token,
            return_path: state.return_path,
        })
    }

    async fn pending_connection(
        &self,
        token: &str,
    ) -> Result<PendingConnection, ConnectionsServiceError> {
        self.pending
            .get(token)
            .await?
            .ok_or(ConnectionsServiceError::NotFound)
    }

    async fn confirm_pending(
        &self,
        token: &str,
        confirm: ConfirmPending,
    ) -> Result<CompanyRecord, ConnectionsServiceError> {
        let pending = self.pending_connection(token).await?;

        let name = confirm
            .name
            .filter(|name| !name.trim().is_empty())
            .or(pending.company_name)
            .ok_or(ConnectionsServiceError::MissingCompanyName)?;

        let company = self
            .companies
            .create_company(NewCompany {
                uuid: CompanyUuid::new(),
                name,
                tax_id: confirm.tax_id,
                realm_id: Some(pending.realm_id.clone()),
                payroll_policy: None,
                vacation_policy: None,
                pay_split: PaySplit::default(),
            })
            .await?;

        if let Err(error) = self.tokens.save_token(company.uuid, &pending.grant).await {
            // Withdraw the company so the pending connection can be confirmed again.
            if let Err(cleanup) = self.companies.delete_company(company.uuid).await {
                warn!(company = %company.uuid, error = %cleanup, "failed to withdraw company");
            }

            return Err(error.into());
        }

        if self.pending.take(token).await?.is_none() {
            warn!(company = %company.uuid, "pending connection vanished before it was consumed");
        }

        info!(company = %company.uuid, realm_id = %pending.realm_id, "confirmed pending connection");

        Ok(company)
    }

    async fn valid_access_token(
        &self,
        company: CompanyUuid,
    ) -> Result<AccessGrant, ConnectionsServiceError> {
        let stored = self
            .tokens
            .find_token(company)
            .await?
            .ok_or(ConnectionsServiceError::NoToken)?;

        let realm_id = stored
            .realm_id
            .clone()
            .ok_or(ConnectionsServiceError::MissingRealm)?;

        if !stored.needs_refresh(Timestamp::now()) {
            return Ok(AccessGrant {
                realm_id,
                access_token: stored.grant.access_token,
            });
        }

        let refreshed = self.force_refresh(company).await?;

        Ok(AccessGrant {
            realm_id,
            access_token: refreshed.access_token,
        })
    }

    async fn force_refresh(
        &self,
        company: CompanyUuid,
    ) -> Result<TokenGrant, ConnectionsServiceError> {
        let stored = self
            .tokens
            .find_token(company)
            .await?
            .ok_or(ConnectionsServiceError::NoToken)?;

        let mut refreshed = self
            .oauth
            .refresh(&stored.grant.refresh_token)
            .await
            .inspect_err(|error| {
                warn!(company = %company, %error, "access token refresh failed");
            })?;

        // refresh responses may omit the scope
        refreshed.scope = refreshed.scope.or(stored.grant.scope);

        self.tokens.save_token(company, &refreshed).await?;

        info!(company = %company, expires_at = %refreshed.expires_at, "refreshed access token");

        Ok(refreshed)
    }

    async fn token_status(
        &self,
        company: CompanyUuid,
    ) -> Result<Option<StoredToken>, ConnectionsServiceError> {
        Ok(self.tokens.find_token(company).await?)
    }

    async fn disconnect(
        &self,
        company: CompanyUuid,
    ) -> Result<RevokeOutcome, ConnectionsServiceError> {
        let outcome = match self.tokens.find_token(company).await? {
            Some(stored) => match self.oauth.revoke(&stored.grant.refresh_token).await {
                Ok(()) => RevokeOutcome::Revoked,
                Err(error) => {
                    warn!(company = %company, %error, "token revoke failed, forgetting tokens anyway");
                    RevokeOutcome::Failed
                }
            },
            None => RevokeOutcome::NotConnected,
        };

        self.tokens.delete_token(company).await?;
        self.companies.set_realm(company, None).await?;

        info!(company = %company, revoke = outcome.as_str(), "disconnected company from quickbooks");

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
/// QuickBooks connection lifecycle for companies.
pub trait ConnectionsService: Send + Sync {
    /// Builds the consent URL for a flow returning to `return_path` and
    /// records its `state` for the callback to redeem.
    async fn authorization_url(
        &self,
        return_path: &str,
        company: Option<CompanyUuid>,
    ) -> Result<String, ConnectionsServiceError>;

    /// Handles the provider callback. The `state` must have been issued by
    /// [`ConnectionsService::authorization_url`] and is consumed; the code is
    /// then exchanged and the tokens either stored for a company or parked
    /// as a pending connection.
    async fn complete_authorization(
        &self,
        code: &str,
        state: &str,
        realm_id: &str,
    ) -> Result<AuthorizationOutcome, ConnectionsServiceError>;

    /// Reads an unexpired pending connection.
    async fn pending_connection(
        &self,
        token: &str,
    ) -> Result<PendingConnection, ConnectionsServiceError>;

    /// Creates a company from a pending connection and consumes it.
    async fn confirm_pending(
        &self,
        token: &str,
        confirm: ConfirmPending,
    ) -> Result<CompanyRecord, ConnectionsServiceError>;

    /// Returns a usable access token, refreshing it first when it is about to expire.
    async fn valid_access_token(
        &self,
        company: CompanyUuid,
    ) -> Result<AccessGrant, ConnectionsServiceError>;

    /// Refreshes the company's token regardless of its expiry.
    async fn force_refresh(
        &self,
        company: CompanyUuid,
    ) -> Result<TokenGrant, ConnectionsServiceError>;

    /// Current token row, if any.
    async fn token_status(
        &self,
        company: CompanyUuid,
    ) -> Result<Option<StoredToken>, ConnectionsServiceError>;

    /// Revokes upstream on a best-effort basis, then forgets the tokens and
    /// unlinks the realm.
    async fn disconnect(&self, company: CompanyUuid)
    -> Result<RevokeOutcome, ConnectionsServiceError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::{
            companies::{CompaniesServiceError, MockCompaniesService},
            connections::{
                pending::MockPendingConnectionsStore, records::OAuthTokenUuid,
                states::MockAuthorizationStateStore, tokens::MockTokenStore,
            },
        },
        quickbooks::{
            catalog::MockCatalogClient, errors::QuickBooksError, models::CompanyInfo,
            oauth::MockOAuthExchange,
        },
    };

    use super::*;

    #[derive(Default)]
    struct Mocks {
        companies: MockCompaniesService,
        tokens: MockTokenStore,
        states: MockAuthorizationStateStore,
        pending: MockPendingConnectionsStore,
        oauth: MockOAuthExchange,
        catalog: MockCatalogClient,
    }

    impl Mocks {
        fn into_service(self) -> QuickBooksConnectionsService {
            QuickBooksConnectionsService::new(ConnectionsDeps {
                companies: Arc::new(self.companies),
                tokens: Arc::new(self.tokens),
                states: Arc::new(self.states),
                pending: Arc::new(self.pending),
                oauth: Arc::new(self.oauth),
                catalog: Arc::new(self.catalog),
                pending_ttl: SignedDuration::from_mins(15),
            })
        }
    }

    /// Issues `state` the way `authorization_url` would and returns its
    /// encoded form, expecting the callback to redeem it once.
    fn issued(mocks: &mut Mocks, state: OAuthState) -> Result<String, StateError> {
        let encoded = state.encode()?;
        let nonce = state.nonce.clone();

        mocks
            .states
            .expect_redeem()
            .withf(move |presented| presented == nonce)
            .times(1)
            .return_once(move |_| Ok(Some(state)));

        Ok(encoded)
    }

    fn grant(access_token: &str, expires_in: SignedDuration) -> TokenGrant {
        TokenGrant {
            access_token: access_token.to_string(),
            refresh_token: format!("refresh-for-{access_token}"),
            token_type: "bearer".to_string(),
            scope: None,
            expires_at: Timestamp::now()
                .checked_add(expires_in)
                .unwrap_or(Timestamp::MAX),
            refresh_token_expires_at: None,
        }
    }

    fn stored(company: CompanyUuid, realm_id: Option<&str>, grant: TokenGrant) -> StoredToken {
        let now = Timestamp::now();

        StoredToken {
            uuid: OAuthTokenUuid::new(),
            company_uuid: company,
            realm_id: realm_id.map(str::to_string),
            grant,
            created_at: now,
            updated_at: now,
        }
    }

    fn company(uuid: CompanyUuid, realm_id: Option<&str>) -> CompanyRecord {
        let now = Timestamp::now();

        CompanyRecord {
            uuid,
            name: "Soda La Esquina".to_string(),
            tax_id: "3-101-000001".to_string(),
            realm_id: realm_id.map(str::to_string),
            payroll_policy: None,
            vacation_policy: None,
            pay_split: PaySplit::default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn no_token_row_is_no_token() {
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(|_| Ok(None));
        mocks.oauth.expect_refresh().never();

        let result = mocks
            .into_service()
            .valid_access_token(CompanyUuid::new())
            .await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::NoToken)),
            "expected NoToken, got {result:?}"
        );
    }

    #[tokio::test]
    async fn company_without_realm_is_missing_realm() {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            Ok(Some(stored(
                company,
                None,
                grant("access-1", SignedDuration::from_hours(1)),
            )))
        });

        let result = mocks.into_service().valid_access_token(company).await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::MissingRealm)),
            "expected MissingRealm, got {result:?}"
        );
    }

    #[tokio::test]
    async fn fresh_token_is_returned_without_refreshing() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            Ok(Some(stored(
                company,
                Some("123"),
                grant("access-1", SignedDuration::from_hours(1)),
            )))
        });
        mocks.tokens.expect_save_token().never();
        mocks.oauth.expect_refresh().never();

        let access = mocks.into_service().valid_access_token(company).await?;

        assert_eq!(
            access,
            AccessGrant {
                realm_id: "123".to_string(),
                access_token: "access-1".to_string(),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn expiring_token_is_refreshed_once_and_persisted() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            Ok(Some(stored(
                company,
                Some("123"),
                grant("access-old", SignedDuration::from_secs(60)),
            )))
        });

        mocks
            .oauth
            .expect_refresh()
            .withf(|refresh_token| refresh_token == "refresh-for-access-old")
            .times(1)
            .returning(|_| Ok(grant("access-new", SignedDuration::from_hours(1))));

        mocks
            .tokens
            .expect_save_token()
            .withf(move |saved_for, grant| {
                *saved_for == company
                    && grant.access_token == "access-new"
                    && grant.refresh_token == "refresh-for-access-new"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let access = mocks.into_service().valid_access_token(company).await?;

        assert_eq!(access.access_token, "access-new");

        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_is_an_upstream_error() {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            Ok(Some(stored(
                company,
                Some("123"),
                grant("access-old", SignedDuration::ZERO),
            )))
        });

        mocks.oauth.expect_refresh().returning(|_| {
            Err(QuickBooksError::Upstream {
                status: 400,
                body: "invalid_grant".to_string(),
            })
        });
        mocks.tokens.expect_save_token().never();

        let result = mocks.into_service().valid_access_token(company).await;

        assert!(
            matches!(
                result,
                Err(ConnectionsServiceError::UpstreamAuth(
                    QuickBooksError::Upstream { status: 400, .. }
                ))
            ),
            "expected UpstreamAuth(400), got {result:?}"
        );
    }

    #[tokio::test]
    async fn disconnect_forgets_tokens_even_when_revoke_fails() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            Ok(Some(stored(
                company,
                Some("123"),
                grant("access-1", SignedDuration::from_hours(1)),
            )))
        });

        mocks.oauth.expect_revoke().times(1).returning(|_| {
            Err(QuickBooksError::Upstream {
                status: 503,
                body: "unavailable".to_string(),
            })
        });

        mocks
            .tokens
            .expect_delete_token()
            .with(eq(company))
            .times(1)
            .returning(|_| Ok(1));

        mocks
            .companies
            .expect_set_realm()
            .with(eq(company), eq(None))
            .times(1)
            .returning(move |uuid, _| Ok(self::company(uuid, None)));

        let outcome = mocks.into_service().disconnect(company).await?;

        assert_eq!(outcome, RevokeOutcome::Failed);

        Ok(())
    }

    #[tokio::test]
    async fn disconnect_reports_successful_revoke() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            Ok(Some(stored(
                company,
                Some("123"),
                grant("access-1", SignedDuration::from_hours(1)),
            )))
        });
        mocks
            .oauth
            .expect_revoke()
            .withf(|token| token == "refresh-for-access-1")
            .returning(|_| Ok(()));
        mocks.tokens.expect_delete_token().returning(|_| Ok(1));
        mocks
            .companies
            .expect_set_realm()
            .returning(move |uuid, _| Ok(self::company(uuid, None)));

        assert_eq!(
            mocks.into_service().disconnect(company).await?,
            RevokeOutcome::Revoked
        );

        Ok(())
    }

    #[tokio::test]
    async fn authorization_url_rejects_absolute_return_paths() {
        let mut mocks = Mocks::default();

        mocks.oauth.expect_authorization_url().never();
        mocks.states.expect_issue().never();

        let result = mocks
            .into_service()
            .authorization_url("https://evil.example/phish", None)
            .await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::InvalidState(_))),
            "expected InvalidState, got {result:?}"
        );
    }

    #[tokio::test]
    async fn callback_for_a_named_company_attaches_the_realm() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();
        let state = issued(&mut mocks, OAuthState::new("/companies", Some(company))?)?;

        mocks
            .oauth
            .expect_exchange_code()
            .withf(|code| code == "auth-code")
            .returning(|_| Ok(grant("access-1", SignedDuration::from_hours(1))));
        mocks
            .companies
            .expect_get_company()
            .returning(|uuid| Ok(self::company(uuid, None)));
        mocks
            .tokens
            .expect_save_token()
            .with(eq(company), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));
        mocks
            .companies
            .expect_set_realm()
            .with(eq(company), eq(Some("123".to_string())))
            .times(1)
            .returning(|uuid, realm| Ok(self::company(uuid, realm.as_deref())));
        mocks.pending.expect_put().never();

        let outcome = mocks
            .into_service()
            .complete_authorization("auth-code", &state, "123")
            .await?;

        assert_eq!(
            outcome,
            AuthorizationOutcome::Connected {
                company,
                return_path: "/companies".to_string(),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn callback_for_an_owned_realm_reconnects_its_company() -> TestResult {
        let owner = CompanyUuid::new();
        let mut mocks = Mocks::default();
        let state = issued(&mut mocks, OAuthState::new("/", None)?)?;

        mocks
            .oauth
            .expect_exchange_code()
            .returning(|_| Ok(grant("access-1", SignedDuration::from_hours(1))));
        mocks
            .companies
            .expect_find_company_by_realm()
            .withf(|realm| realm == "123")
            .returning(move |realm| Ok(Some(company(owner, Some(realm)))));
        mocks
            .tokens
            .expect_save_token()
            .with(eq(owner), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));
        mocks.pending.expect_put().never();

        let outcome = mocks
            .into_service()
            .complete_authorization("auth-code", &state, "123")
            .await?;

        assert!(
            matches!(outcome, AuthorizationOutcome::Connected { company, .. } if company == owner),
            "expected reconnect of the owner, got {outcome:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn callback_for_an_unknown_realm_parks_a_pending_connection() -> TestResult {
        let mut mocks = Mocks::default();
        let state = issued(&mut mocks, OAuthState::new("/onboarding", None)?)?;

        mocks
            .oauth
            .expect_exchange_code()
            .returning(|_| Ok(grant("access-1", SignedDuration::from_hours(1))));
        mocks
            .companies
            .expect_find_company_by_realm()
            .returning(|_| Ok(None));
        mocks.catalog.expect_company_info().returning(|_, _| {
            Ok(CompanyInfo {
                company_name: "Panadería Sol".to_string(),
                legal_name: None,
                country: Some("CR".to_string()),
            })
        });
        mocks
            .pending
            .expect_put()
            .withf(|pending| {
                pending.realm_id == "123"
                    && pending.company_name.as_deref() == Some("Panadería Sol")
                    && pending.return_path == "/onboarding"
            })
            .times(1)
            .returning(|pending| {
                Ok(PendingConnection {
                    token: pending.token,
                    realm_id: pending.realm_id,
                    company_name: pending.company_name,
                    return_path: pending.return_path,
                    grant: pending.grant,
                    created_at: Timestamp::now(),
                    expires_at: pending.expires_at,
                })
            });
        mocks.tokens.expect_save_token().never();

        let outcome = mocks
            .into_service()
            .complete_authorization("auth-code", &state, "123")
            .await?;

        let AuthorizationOutcome::Pending { token, return_path } = outcome else {
            return Err(format!("expected Pending, got {outcome:?}").into());
        };

        assert_eq!(token.len(), 64);
        assert_eq!(return_path, "/onboarding");

        Ok(())
    }

    #[tokio::test]
    async fn company_name_lookup_failure_still_parks() -> TestResult {
        let mut mocks = Mocks::default();
        let state = issued(&mut mocks, OAuthState::new("/", None)?)?;

        mocks
            .oauth
            .expect_exchange_code()
            .returning(|_| Ok(grant("access-1", SignedDuration::from_hours(1))));
        mocks
            .companies
            .expect_find_company_by_realm()
            .returning(|_| Ok(None));
        mocks.catalog.expect_company_info().returning(|_, _| {
            Err(QuickBooksError::Upstream {
                status: 500,
                body: String::new(),
            })
        });
        mocks
            .pending
            .expect_put()
            .withf(|pending| pending.company_name.is_none())
            .times(1)
            .returning(|pending| {
                Ok(PendingConnection {
                    token: pending.token,
                    realm_id: pending.realm_id,
                    company_name: None,
                    return_path: pending.return_path,
                    grant: pending.grant,
                    created_at: Timestamp::now(),
                    expires_at: pending.expires_at,
                })
            });

        let outcome = mocks
            .into_service()
            .complete_authorization("auth-code", &state, "123")
            .await?;

        assert!(
            matches!(outcome, AuthorizationOutcome::Pending { .. }),
            "expected Pending, got {outcome:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_state_is_rejected_before_exchanging() {
        let mut mocks = Mocks::default();

        mocks.oauth.expect_exchange_code().never();

        let result = mocks
            .into_service()
            .complete_authorization("auth-code", "not-a-state", "123")
            .await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::InvalidState(_))),
            "expected InvalidState, got {result:?}"
        );
    }

    #[tokio::test]
    async fn confirming_an_unknown_token_is_not_found() {
        let mut mocks = Mocks::default();

        mocks.pending.expect_get().returning(|_| Ok(None));
        mocks.companies.expect_create_company().never();

        let result = mocks
            .into_service()
            .confirm_pending(
                "missing",
                ConfirmPending {
                    name: None,
                    tax_id: "3-101-000009".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn confirming_creates_the_company_and_consumes_the_record() -> TestResult {
        let mut mocks = Mocks::default();

        let parked = PendingConnection {
            token: "pending-1".to_string(),
            realm_id: "123".to_string(),
            company_name: Some("Panadería Sol".to_string()),
            return_path: "/".to_string(),
            grant: grant("access-1", SignedDuration::from_hours(1)),
            created_at: Timestamp::now(),
            expires_at: Timestamp::now(),
        };

        let for_get = parked.clone();
        mocks
            .pending
            .expect_get()
            .returning(move |_| Ok(Some(for_get.clone())));

        mocks
            .companies
            .expect_create_company()
            .withf(|new| {
                new.name == "Panadería Sol"
                    && new.tax_id == "3-101-000009"
                    && new.realm_id.as_deref() == Some("123")
            })
            .times(1)
            .returning(|new| Ok(company(new.uuid, new.realm_id.as_deref())));

        mocks
            .tokens
            .expect_save_token()
            .withf(|_, grant| grant.access_token == "access-1")
            .times(1)
            .returning(|_, _| Ok(()));

        mocks
            .pending
            .expect_take()
            .withf(|token| token == "pending-1")
            .times(1)
            .returning(move |_| Ok(Some(parked.clone())));

        let created = mocks
            .into_service()
            .confirm_pending(
                "pending-1",
                ConfirmPending {
                    name: Some("   ".to_string()),
                    tax_id: "3-101-000009".to_string(),
                },
            )
            .await?;

        assert_eq!(created.realm_id.as_deref(), Some("123"));

        Ok(())
    }

    #[tokio::test]
    async fn authorization_url_records_the_issued_state() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .oauth
            .expect_authorization_url()
            .times(1)
            .returning(|state| Ok(format!("https://appcenter.intuit.com/connect/oauth2?state={state}")));
        mocks
            .states
            .expect_issue()
            .withf(move |state, expires_at| {
                state.return_path == "/companies"
                    && state.company == Some(company)
                    && *expires_at > Timestamp::now()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let url = mocks
            .into_service()
            .authorization_url("/companies", Some(company))
            .await?;

        assert!(url.contains("state="), "{url}");

        Ok(())
    }

    #[tokio::test]
    async fn forged_state_is_rejected_before_exchanging() -> TestResult {
        let victim = CompanyUuid::new();
        let forged = OAuthState {
            return_path: "/".to_string(),
            company: Some(victim),
            nonce: "anything".to_string(),
        }
        .encode()?;
        let mut mocks = Mocks::default();

        mocks
            .states
            .expect_redeem()
            .withf(|nonce| nonce == "anything")
            .times(1)
            .returning(|_| Ok(None));
        mocks.oauth.expect_exchange_code().never();
        mocks.tokens.expect_save_token().never();
        mocks.companies.expect_set_realm().never();

        let result = mocks
            .into_service()
            .complete_authorization("attacker-code", &forged, "ATTACKER-REALM")
            .await;

        assert!(
            matches!(
                result,
                Err(ConnectionsServiceError::InvalidState(StateError::Unrecognized))
            ),
            "expected InvalidState(Unrecognized), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn state_naming_another_company_is_rejected() -> TestResult {
        let issued_state = OAuthState::new("/", None)?;
        let tampered = OAuthState {
            company: Some(CompanyUuid::new()),
            ..issued_state.clone()
        }
        .encode()?;
        let mut mocks = Mocks::default();

        mocks
            .states
            .expect_redeem()
            .times(1)
            .return_once(move |_| Ok(Some(issued_state)));
        mocks.oauth.expect_exchange_code().never();

        let result = mocks
            .into_service()
            .complete_authorization("auth-code", &tampered, "123")
            .await;

        assert!(
            matches!(
                result,
                Err(ConnectionsServiceError::InvalidState(StateError::Unrecognized))
            ),
            "expected InvalidState(Unrecognized), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn realm_owned_elsewhere_leaves_tokens_untouched() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();
        let state = issued(&mut mocks, OAuthState::new("/", Some(company))?)?;

        mocks
            .oauth
            .expect_exchange_code()
            .returning(|_| Ok(grant("access-1", SignedDuration::from_hours(1))));
        mocks
            .companies
            .expect_get_company()
            .returning(|uuid| Ok(self::company(uuid, Some("old-realm"))));
        mocks
            .companies
            .expect_set_realm()
            .times(1)
            .returning(|_, _| Err(CompaniesServiceError::AlreadyExists));
        mocks.tokens.expect_save_token().never();

        let result = mocks
            .into_service()
            .complete_authorization("auth-code", &state, "123")
            .await;

        assert!(
            matches!(
                result,
                Err(ConnectionsServiceError::Company(
                    CompaniesServiceError::AlreadyExists
                ))
            ),
            "expected Company(AlreadyExists), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_token_save_restores_the_previous_realm() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();
        let state = issued(&mut mocks, OAuthState::new("/", Some(company))?)?;

        mocks
            .oauth
            .expect_exchange_code()
            .returning(|_| Ok(grant("access-1", SignedDuration::from_hours(1))));
        mocks
            .companies
            .expect_get_company()
            .returning(|uuid| Ok(self::company(uuid, Some("old-realm"))));
        mocks
            .companies
            .expect_set_realm()
            .with(eq(company), eq(Some("123".to_string())))
            .times(1)
            .returning(|uuid, realm| Ok(self::company(uuid, realm.as_deref())));
        mocks
            .companies
            .expect_set_realm()
            .with(eq(company), eq(Some("old-realm".to_string())))
            .times(1)
            .returning(|uuid, realm| Ok(self::company(uuid, realm.as_deref())));
        mocks
            .tokens
            .expect_save_token()
            .times(1)
            .returning(|_, _| Err(sqlx::Error::PoolTimedOut));

        let result = mocks
            .into_service()
            .complete_authorization("auth-code", &state, "123")
            .await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_token_save_withdraws_the_confirmed_company() {
        let mut mocks = Mocks::default();

        let parked = PendingConnection {
            token: "pending-1".to_string(),
            realm_id: "123".to_string(),
            company_name: Some("Panadería Sol".to_string()),
            return_path: "/".to_string(),
            grant: grant("access-1", SignedDuration::from_hours(1)),
            created_at: Timestamp::now(),
            expires_at: Timestamp::now(),
        };

        mocks
            .pending
            .expect_get()
            .returning(move |_| Ok(Some(parked.clone())));

        let created = CompanyUuid::new();

        mocks
            .companies
            .expect_create_company()
            .times(1)
            .returning(move |new| Ok(company(created, new.realm_id.as_deref())));
        mocks
            .tokens
            .expect_save_token()
            .times(1)
            .returning(|_, _| Err(sqlx::Error::PoolTimedOut));
        mocks
            .companies
            .expect_delete_company()
            .with(eq(created))
            .times(1)
            .returning(|_| Ok(()));
        mocks.pending.expect_take().never();

        let result = mocks
            .into_service()
            .confirm_pending(
                "pending-1",
                ConfirmPending {
                    name: None,
                    tax_id: "3-101-000009".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ConnectionsServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
    }

    #[tokio::test]
    async fn disconnect_without_token_is_not_connected() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(|_| Ok(None));
        mocks.oauth.expect_revoke().never();
        mocks.tokens.expect_delete_token().returning(|_| Ok(0));
        mocks
            .companies
            .expect_set_realm()
            .returning(move |uuid, _| Ok(self::company(uuid, None)));

        assert_eq!(
            mocks.into_service().disconnect(company).await?,
            RevokeOutcome::NotConnected
        );

        Ok(())
    }

    #[tokio::test]
    async fn refresh_without_scope_keeps_the_stored_scope() -> TestResult {
        let company = CompanyUuid::new();
        let mut mocks = Mocks::default();

        mocks.tokens.expect_find_token().returning(move |_| {
            let mut old = grant("access-old", SignedDuration::ZERO);
            old.scope = Some("com.intuit.quickbooks.accounting".to_string());

            Ok(Some(stored(company, Some("123"), old)))
        });
        mocks
            .oauth
            .expect_refresh()
            .returning(|_| Ok(grant("access-new", SignedDuration::from_hours(1))));
        mocks
            .tokens
            .expect_save_token()
            .withf(|_, grant| grant.scope.as_deref() == Some("com.intuit.quickbooks.accounting"))
            .times(1)
            .returning(|_, _| Ok(()));

        let refreshed = mocks.into_service().force_refresh(company).await?;

        assert_eq!(
            refreshed.scope.as_deref(),
            Some("com.intuit.quickbooks.accounting")
        );

        Ok(())
    }
}
