//! Session store: the single source of truth for authentication state.

use super::keys::SessionKeys;
use super::model::{Session, TenantContext, parse_expiration};
use crate::config::DeploymentProfile;
use crate::error::{ConsoleError, Result};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// What `restore` found in durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A live session was loaded.
    Restored,
    /// Nothing was stored.
    Empty,
    /// A stored session had expired and was discarded.
    Expired,
}

/// Holds the current session in memory and mirrors it to durable storage.
///
/// Many in-flight requests read the store concurrently; only login, logout
/// and restore write it. The in-memory lock is never held across an await.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    profile: DeploymentProfile,
    keys: SessionKeys,
    current: RwLock<Session>,
}

impl SessionStore {
    /// Creates a store with an empty in-memory session.
    ///
    /// Call [`SessionStore::restore`] to pick up a persisted session.
    pub fn new(storage: Arc<dyn KeyValueStore>, profile: DeploymentProfile) -> Self {
        Self {
            storage,
            profile,
            keys: SessionKeys::for_profile(profile),
            current: RwLock::new(Session::empty()),
        }
    }

    pub fn profile(&self) -> DeploymentProfile {
        self.profile
    }

    pub fn keys(&self) -> SessionKeys {
        self.keys
    }

    /// Loads the persisted session, discarding it if it has expired.
    pub fn restore(&self) -> Result<RestoreOutcome> {
        self.restore_at(Utc::now())
    }

    /// [`SessionStore::restore`] against an explicit clock.
    pub fn restore_at(&self, now: DateTime<Utc>) -> Result<RestoreOutcome> {
        let expires_at = match self.storage.get(self.keys.expiration)? {
            Some(raw) => {
                let parsed = parse_expiration(&raw);
                if parsed.is_none() && !raw.trim().is_empty() {
                    warn!(key = self.keys.expiration, "Ignoring unparseable stored expiration");
                }
                parsed
            }
            None => None,
        };

        if expires_at.is_some_and(|at| at <= now) {
            self.clear_session()?;
            info!(profile = %self.profile, "Stored session expired, signed out");
            return Ok(RestoreOutcome::Expired);
        }

        let session = Session::from_parts(
            self.storage.get(self.keys.token)?,
            self.read_optional(self.keys.tenant_id)?,
            self.read_optional(self.keys.company_id)?,
            self.read_optional(self.keys.branch_id)?,
            expires_at,
        );
        let outcome = if session.is_authenticated() {
            RestoreOutcome::Restored
        } else {
            RestoreOutcome::Empty
        };
        self.replace(session);

        info!(profile = %self.profile, outcome = ?outcome, "Session restored from storage");
        Ok(outcome)
    }

    /// Stores a multi-tenant session, replacing any prior one.
    ///
    /// All four values are required together.
    pub fn set_session(
        &self,
        token: &str,
        company_id: &str,
        branch_id: &str,
        tenant_id: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let (Some(company_key), Some(branch_key), Some(tenant_key)) =
            (self.keys.company_id, self.keys.branch_id, self.keys.tenant_id)
        else {
            return Err(ConsoleError::profile(format!(
                "the {} profile does not carry tenant context",
                self.profile
            )));
        };

        for (name, value) in [
            ("token", token),
            ("company id", company_id),
            ("branch id", branch_id),
            ("tenant id", tenant_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConsoleError::IncompleteSession(format!("{} is empty", name)));
            }
        }

        self.write_session(
            &[
                (self.keys.token, token),
                (company_key, company_id),
                (branch_key, branch_id),
                (tenant_key, tenant_id),
            ],
            expires_at,
        )?;

        self.replace(Session::with_context(
            token,
            TenantContext::new(tenant_id, company_id, branch_id),
            expires_at,
        ));
        info!(profile = %self.profile, "Session stored");
        Ok(())
    }

    /// Stores a bearer-only session, replacing any prior one.
    pub fn set_token(&self, token: &str, expires_at: Option<DateTime<Utc>>) -> Result<()> {
        if self.profile.carries_tenant_context() {
            return Err(ConsoleError::profile(format!(
                "the {} profile requires tenant context with the token",
                self.profile
            )));
        }
        if token.trim().is_empty() {
            return Err(ConsoleError::IncompleteSession("token is empty".into()));
        }

        self.write_session(&[(self.keys.token, token)], expires_at)?;

        self.replace(Session::bearer(token, expires_at));
        info!(profile = %self.profile, "Session stored");
        Ok(())
    }

    /// Removes the session from memory and storage. Safe when already empty.
    pub fn clear_session(&self) -> Result<()> {
        self.storage.remove_many(&self.keys.all())?;
        self.replace(Session::empty());
        Ok(())
    }

    pub fn current_token(&self) -> Option<String> {
        self.read(|s| s.token().map(str::to_string))
    }

    pub fn current_context(&self) -> Option<TenantContext> {
        self.read(Session::context)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(Session::is_authenticated)
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read(Session::clone)
    }

    /// Persists `entries` and the expiration. A new expiration goes in the
    /// same batch as the token; a stale one is removed before the token is
    /// written.
    fn write_session(
        &self,
        entries: &[(&str, &str)],
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        match expires_at.map(|at| at.to_rfc3339()) {
            Some(expiration) => {
                let mut batch = entries.to_vec();
                batch.push((self.keys.expiration, expiration.as_str()));
                self.storage.set_many(&batch)
            }
            None => {
                self.storage.remove(self.keys.expiration)?;
                self.storage.set_many(entries)
            }
        }
    }

    fn read_optional(&self, key: Option<&str>) -> Result<Option<String>> {
        match key {
            Some(key) => self.storage.get(key),
            None => Ok(None),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn replace(&self, session: Session) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = session;
    }
}
