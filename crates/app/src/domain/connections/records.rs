//! Connection Records

use jiff::{SignedDuration, Timestamp};

use crate::{
    domain::companies::records::CompanyUuid, quickbooks::oauth::TokenGrant, uuids::TypedUuid,
};

/// Access tokens this close to expiry are refreshed before use.
pub const REFRESH_MARGIN: SignedDuration = SignedDuration::from_mins(2);

/// How long an issued OAuth `state` can be redeemed by the callback.
pub const AUTHORIZATION_STATE_TTL: SignedDuration = SignedDuration::from_mins(30);

/// OAuth Token UUID
pub type OAuthTokenUuid = TypedUuid<StoredToken>;

/// The single token row a connected company owns.
#[derive(Debug, Clone)]
pub struct StoredToken {
    pub uuid: OAuthTokenUuid,
    pub company_uuid: CompanyUuid,

    /// Realm of the owning company; `None` once it was disconnected.
    pub realm_id: Option<String>,

    pub grant: TokenGrant,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredToken {
    /// Whether the access token expires within [`REFRESH_MARGIN`] of `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: Timestamp) -> bool {
        self.grant.expires_at.duration_since(now) <= REFRESH_MARGIN
    }
}

/// A realm's tokens parked until an operator attaches them to a new company.
#[derive(Debug, Clone)]
pub struct PendingConnection {
    /// Random correlation token addressing this record.
    pub token: String,

    pub realm_id: String,

    /// Display name reported by QuickBooks, when it could be fetched.
    pub company_name: Option<String>,

    pub return_path: String,
    pub grant: TokenGrant,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Data for parking a pending connection.
#[derive(Debug, Clone)]
pub struct NewPendingConnection {
    pub token: String,
    pub realm_id: String,
    pub company_name: Option<String>,
    pub return_path: String,
    pub grant: TokenGrant,
    pub expires_at: Timestamp,
}

/// Realm and bearer token to call the accounting API with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub realm_id: String,
    pub access_token: String,
}

/// Where a completed authorization left the realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// Tokens were stored for an existing company.
    Connected {
        company: CompanyUuid,
        return_path: String,
    },

    /// No company owns the realm yet; the tokens wait under `token`.
    Pending { token: String, return_path: String },
}

/// What the upstream revoke did when a company was disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// QuickBooks revoked the refresh token.
    Revoked,

    /// The revoke call failed; the local tokens were forgotten anyway.
    Failed,

    /// The company had no stored token, so nothing was sent upstream.
    NotConnected,
}

impl RevokeOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revoked => "revoked",
            Self::Failed => "failed",
            Self::NotConnected => "not_connected",
        }
    }
}

/// Operator input when turning a pending connection into a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPending {
    /// Overrides the name QuickBooks reported.
    pub name: Option<String>,
    pub tax_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(expires_at: Timestamp) -> StoredToken {
        let now = Timestamp::now();

        StoredToken {
            uuid: OAuthTokenUuid::new(),
            company_uuid: CompanyUuid::new(),
            realm_id: Some("123".to_string()),
            grant: TokenGrant {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                token_type: "bearer".to_string(),
                scope: None,
                expires_at,
                refresh_token_expires_at: None,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn refresh_is_needed_inside_the_margin() -> Result<(), jiff::Error> {
        let now = Timestamp::now();

        assert!(!stored(now.checked_add(SignedDuration::from_mins(10))?).needs_refresh(now));
        assert!(stored(now.checked_add(SignedDuration::from_mins(2))?).needs_refresh(now));
        assert!(stored(now.checked_add(SignedDuration::from_secs(30))?).needs_refresh(now));
        assert!(stored(now.checked_sub(SignedDuration::from_mins(5))?).needs_refresh(now));

        Ok(())
    }
}
