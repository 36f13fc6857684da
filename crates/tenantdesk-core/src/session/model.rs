//! Session domain model.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Identifiers scoping a request to one customer organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: String,
    pub company_id: String,
    pub branch_id: String,
}

impl TenantContext {
    pub fn new(
        tenant_id: impl Into<String>,
        company_id: impl Into<String>,
        branch_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            company_id: company_id.into(),
            branch_id: branch_id.into(),
        }
    }
}

/// The authenticated state of the console.
///
/// Identifiers are only observable while a token is held: every accessor
/// returns `None` for them when the token is absent, whatever was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    tenant_id: Option<String>,
    company_id: Option<String>,
    branch_id: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// An empty session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A multi-tenant session: bearer token plus tenant context.
    pub fn with_context(
        token: impl Into<String>,
        context: TenantContext,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token: Some(token.into()),
            tenant_id: Some(context.tenant_id),
            company_id: Some(context.company_id),
            branch_id: Some(context.branch_id),
            expires_at,
        }
    }

    /// A bearer-only session.
    pub fn bearer(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: Some(token.into()),
            expires_at,
            ..Self::default()
        }
    }

    /// Builds a session from raw stored values. Empty strings count as absent.
    pub(crate) fn from_parts(
        token: Option<String>,
        tenant_id: Option<String>,
        company_id: Option<String>,
        branch_id: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token: non_empty(token),
            tenant_id: non_empty(tenant_id),
            company_id: non_empty(company_id),
            branch_id: non_empty(branch_id),
            expires_at,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.scoped(&self.tenant_id)
    }

    pub fn company_id(&self) -> Option<&str> {
        self.scoped(&self.company_id)
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.scoped(&self.branch_id)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.token.as_ref().and(self.expires_at)
    }

    /// The complete tenant context, if the session holds one.
    pub fn context(&self) -> Option<TenantContext> {
        Some(TenantContext {
            tenant_id: self.tenant_id()?.to_string(),
            company_id: self.company_id()?.to_string(),
            branch_id: self.branch_id()?.to_string(),
        })
    }

    /// Whether the session has an expiration at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }

    fn scoped<'a>(&'a self, value: &'a Option<String>) -> Option<&'a str> {
        self.token.as_ref()?;
        value.as_deref()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an expiration timestamp as the server and older stored sessions
/// write it.
///
/// Accepts RFC 3339, a zone-less ISO date-time (read as local time), or a
/// bare date (UTC midnight).
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    parse_expiration_in(raw, &Local)
}

/// [`parse_expiration`] with zone-less date-times read in `zone`.
pub fn parse_expiration_in<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            // A time skipped by a DST jump has no local reading.
            return zone
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
