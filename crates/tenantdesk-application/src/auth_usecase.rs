//! Authentication use case.
//!
//! Turns a login answer into a stored session for the active deployment
//! profile, and owns the login form's remember-me preference.

use std::sync::Arc;
use tenantdesk_core::session::{RestoreOutcome, SessionStore, parse_expiration};
use tenantdesk_core::storage::KeyValueStore;
use tenantdesk_core::{ConsoleError, Result};
use tenantdesk_interaction::{ConsoleApi, LoginGrant, LoginOutcome};
use tracing::{info, warn};

/// Phone number pre-filled on the login form.
pub const REMEMBERED_PHONE_KEY: &str = "admin_remembered_phone";
/// `"true"` while the remembered phone should be used.
pub const REMEMBER_ME_KEY: &str = "admin_remember_me";

/// What a login attempt ended in, when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    SignedIn,
    /// Wrong phone or password. Nothing was stored.
    Rejected,
}

pub struct AuthUseCase {
    api: ConsoleApi,
    /// Durable storage for the remember-me keys.
    preferences: Arc<dyn KeyValueStore>,
}

impl AuthUseCase {
    pub fn new(api: ConsoleApi, preferences: Arc<dyn KeyValueStore>) -> Self {
        Self { api, preferences }
    }

    fn session(&self) -> &Arc<SessionStore> {
        self.api.dispatcher().session()
    }

    /// Logs in and stores the issued session.
    ///
    /// Multi-tenant grants must carry all three context identifiers.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResult> {
        match self.api.login(phone, password).await? {
            LoginOutcome::CredentialsRejected => {
                info!("Login rejected by server");
                Ok(LoginResult::Rejected)
            }
            LoginOutcome::Accepted(grant) => {
                self.store_grant(&grant)?;
                info!(profile = %self.session().profile(), "Signed in");
                Ok(LoginResult::SignedIn)
            }
        }
    }

    fn store_grant(&self, grant: &LoginGrant) -> Result<()> {
        let expires_at = grant.expiration.as_deref().and_then(|raw| {
            let parsed = parse_expiration(raw);
            if parsed.is_none() {
                warn!("Ignoring unparseable login expiration");
            }
            parsed
        });

        let session = self.session();
        if !session.profile().carries_tenant_context() {
            return session.set_token(grant.token(), expires_at);
        }

        match (&grant.company_id, &grant.branch_id, &grant.tenant_id) {
            (Some(company_id), Some(branch_id), Some(tenant_id)) => {
                session.set_session(grant.token(), company_id, branch_id, tenant_id, expires_at)
            }
            _ => Err(ConsoleError::malformed("Invalid login response")),
        }
    }

    /// Clears the session. Safe when already signed out.
    pub fn logout(&self) -> Result<()> {
        self.session().clear_session()?;
        info!("Signed out");
        Ok(())
    }

    /// Picks up a persisted session; an expired one is discarded.
    pub fn restore(&self) -> Result<RestoreOutcome> {
        self.session().restore()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Stores `phone` for the next login, or forgets it when `remember` is off.
    pub fn remember(&self, phone: &str, remember: bool) -> Result<()> {
        if remember {
            self.preferences
                .set_many(&[(REMEMBERED_PHONE_KEY, phone), (REMEMBER_ME_KEY, "true")])
        } else {
            self.preferences
                .remove_many(&[REMEMBERED_PHONE_KEY, REMEMBER_ME_KEY])
        }
    }

    /// The phone to pre-fill, if remember-me is on.
    pub fn remembered_phone(&self) -> Result<Option<String>> {
        if self.preferences.get(REMEMBER_ME_KEY)?.as_deref() != Some("true") {
            return Ok(None);
        }
        Ok(self
            .preferences
            .get(REMEMBERED_PHONE_KEY)?
            .filter(|phone| !phone.is_empty()))
    }
}
