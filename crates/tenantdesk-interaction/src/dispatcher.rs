//! Authenticated request dispatch.
//!
//! The dispatcher turns an [`ApiRequest`] into a [`RequestContext`] using
//! the current session, sends it, and normalizes the reply:
//!
//! - non-2xx: `Transport` carrying the body text (or the request's fallback)
//! - 2xx but not JSON: `MalformedResponse`
//! - `isvalid: true`: the `data` field, or the whole envelope for mutations
//! - `isvalid` falsy: `Domain` with the joined `errors` (or the fallback)
//!
//! Login is the one call that does not answer with an envelope; see
//! [`Dispatcher::login`]. The dispatcher never writes to the session store.

use crate::request::{ApiRequest, RequestContext, ResponseShape};
use crate::transport::{RawResponse, Transport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use tenantdesk_core::config::ApiConfig;
use tenantdesk_core::envelope::Envelope;
use tenantdesk_core::session::{Session, SessionStore};
use tenantdesk_core::{ConsoleError, Result};
use tracing::debug;

const LOGIN_PATH: &str = "/Login";
const LOGIN_FALLBACK: &str = "Login failed";

/// Credentials issued by a successful login.
///
/// Multi-tenant deployments return the tenant context alongside the token;
/// simple-admin deployments return only `token` and `expiration`. The
/// server has used several spellings for the identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LoginGrant {
    #[serde(default, deserialize_with = "identifier")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "identifier")]
    pub expiration: Option<String>,
    #[serde(
        default,
        alias = "branchId",
        alias = "BranchId",
        alias = "BranchID",
        deserialize_with = "identifier"
    )]
    pub branch_id: Option<String>,
    #[serde(
        default,
        alias = "companyId",
        alias = "CompanyID",
        deserialize_with = "identifier"
    )]
    pub company_id: Option<String>,
    #[serde(
        default,
        alias = "tenantId",
        alias = "TenantId",
        deserialize_with = "identifier"
    )]
    pub tenant_id: Option<String>,
}

impl LoginGrant {
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }
}

/// Terminal state of a login call that got an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted(LoginGrant),
    /// The server answered `false`: wrong phone or password.
    CredentialsRejected,
}

/// Issues calls against the console API with the session's credentials.
pub struct Dispatcher {
    base_url: String,
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Fails if the configured base URL is not an absolute http(s) URL.
    pub fn new(
        api: &ApiConfig,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: api.normalized_base_url()?,
            session,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The context `request` would be sent with right now.
    pub fn context_for(&self, request: &ApiRequest) -> RequestContext {
        RequestContext::build(
            &self.base_url,
            request,
            &self.session.snapshot(),
            self.session.profile(),
        )
    }

    /// Performs one call and unwraps the envelope.
    pub async fn call(&self, request: ApiRequest) -> Result<Value> {
        let context = self.context_for(&request);
        let raw = self.send(&request, &context).await?;

        if !raw.is_success() {
            return Err(transport_error(&raw, &request.fallback_message));
        }

        let parsed: Value = serde_json::from_str(&raw.body)
            .map_err(|e| ConsoleError::malformed(e.to_string()))?;
        let envelope = Envelope::from_value(&parsed);

        if !envelope.isvalid {
            let message = envelope
                .error_message()
                .unwrap_or_else(|| request.fallback_message.clone());
            debug!(path = %request.path, "Envelope reported failure");
            return Err(ConsoleError::domain(message));
        }

        Ok(match request.shape {
            ResponseShape::Data => envelope.data.unwrap_or(Value::Null),
            ResponseShape::Whole => parsed,
        })
    }

    /// [`Dispatcher::call`] for single-record endpoints, deserializing the
    /// data into `T`. A success without data is reported with the request's
    /// fallback message.
    pub async fn call_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let fallback = request.fallback_message.clone();
        match self.call(request).await? {
            Value::Null => Err(ConsoleError::domain(fallback)),
            value => {
                serde_json::from_value(value).map_err(|e| ConsoleError::malformed(e.to_string()))
            }
        }
    }

    /// [`Dispatcher::call`] for list endpoints: absent data is an empty list.
    pub async fn call_list<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>> {
        match self.call(request).await? {
            Value::Null => Ok(Vec::new()),
            value => {
                serde_json::from_value(value).map_err(|e| ConsoleError::malformed(e.to_string()))
            }
        }
    }

    /// Calls `POST /Login`.
    ///
    /// The request carries no session headers. A raw `false` body means the
    /// credentials were rejected, whatever the status; an empty 2xx body
    /// means the same. Anything else must be a JSON grant with a token.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginOutcome> {
        let request = ApiRequest::post(LOGIN_PATH)
            .query("PhoneNo", phone)
            .query("Password", password)
            .fallback(LOGIN_FALLBACK);
        let context = RequestContext::build(
            &self.base_url,
            &request,
            &Session::empty(),
            self.session.profile(),
        );
        let raw = self.send(&request, &context).await?;

        let body = raw.body.trim();
        if body == "false" {
            return Ok(LoginOutcome::CredentialsRejected);
        }
        if !raw.is_success() {
            return Err(transport_error(&raw, &request.fallback_message));
        }
        if body.is_empty() {
            return Ok(LoginOutcome::CredentialsRejected);
        }

        let grant: LoginGrant =
            serde_json::from_str(body).map_err(|e| ConsoleError::malformed(e.to_string()))?;
        if grant.token.is_none() {
            return Err(ConsoleError::malformed("login response carries no token"));
        }
        Ok(LoginOutcome::Accepted(grant))
    }

    async fn send(&self, request: &ApiRequest, context: &RequestContext) -> Result<RawResponse> {
        // Only the path is logged; the query may hold credentials.
        debug!(method = %request.method, path = %request.path, "Dispatching request");
        let raw = self.transport.send(context).await?;
        debug!(method = %request.method, path = %request.path, status = raw.status, "Response received");
        Ok(raw)
    }
}

fn transport_error(raw: &RawResponse, fallback: &str) -> ConsoleError {
    let text = raw.body.trim();
    let message = if text.is_empty() { fallback } else { text };
    ConsoleError::transport(raw.status, message)
}

/// Strings, numbers, or null; blank strings read as absent.
fn identifier<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubTransport;
    use serde_json::json;
    use tenantdesk_core::config::DeploymentProfile;
    use tenantdesk_core::storage::InMemoryKeyValueStore;

    fn dispatcher(profile: DeploymentProfile) -> (Dispatcher, Arc<StubTransport>) {
        let store = Arc::new(SessionStore::new(
            Arc::new(InMemoryKeyValueStore::new()),
            profile,
        ));
        let stub = Arc::new(StubTransport::new());
        let dispatcher = Dispatcher::new(
            &ApiConfig::new("https://api.example.com/"),
            store,
            stub.clone(),
        )
        .unwrap();
        (dispatcher, stub)
    }

    fn multi_tenant() -> (Dispatcher, Arc<StubTransport>) {
        dispatcher(DeploymentProfile::MultiTenant)
    }

    #[tokio::test]
    async fn test_valid_envelope_returns_data() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, r#"{"isvalid":true,"data":{"id":"1"}}"#);

        let value = dispatcher.call(ApiRequest::get("/getAgent")).await.unwrap();
        assert_eq!(value, json!({"id": "1"}));
    }

    #[tokio::test]
    async fn test_mutation_returns_whole_envelope() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, r#"{"isvalid":true,"data":null,"errors":[]}"#);

        let value = dispatcher.call(ApiRequest::post("/addTenant")).await.unwrap();
        assert_eq!(value["isvalid"], json!(true));
    }

    #[tokio::test]
    async fn test_valid_envelope_without_data_is_null() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, r#"{"isvalid":true}"#);

        let value = dispatcher.call(ApiRequest::get("/getTenants")).await.unwrap();
        assert_eq!(value, Value::Null);

        stub.push(200, r#"{"isvalid":true}"#);
        let list: Vec<Value> = dispatcher.call_list(ApiRequest::get("/getTenants")).await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_envelope_is_domain_error() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, r#"{"isvalid":false,"errors":["bad code"]}"#);

        let err = dispatcher.call(ApiRequest::get("/getTenants")).await.unwrap_err();
        assert_eq!(err, ConsoleError::Domain("bad code".into()));
    }

    #[tokio::test]
    async fn test_invalid_envelope_joins_errors_or_falls_back() {
        let (dispatcher, stub) = multi_tenant();
        stub.push_errors(&["name required", "code taken"]);
        stub.push(200, r#"{"isvalid":false,"errors":null}"#);

        let request = ApiRequest::post("/addTenant").fallback("Failed to add tenant");
        let err = dispatcher.call(request.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "name required, code taken");

        let err = dispatcher.call(request).await.unwrap_err();
        assert_eq!(err, ConsoleError::Domain("Failed to add tenant".into()));
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(503, "server down");
        stub.push(500, "");

        let request = ApiRequest::get("/getTenants").fallback("Failed to fetch tenants");
        let err = dispatcher.call(request.clone()).await.unwrap_err();
        assert_eq!(err, ConsoleError::transport(503, "server down"));
        assert_eq!(err.to_string(), "server down");

        let err = dispatcher.call(request).await.unwrap_err();
        assert_eq!(err, ConsoleError::transport(500, "Failed to fetch tenants"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, "<html><body>gateway</body></html>");

        let err = dispatcher.call(ApiRequest::get("/getTenants")).await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let (dispatcher, stub) = multi_tenant();
        stub.push_failure(ConsoleError::network("connection refused"));

        let err = dispatcher.call(ApiRequest::get("/getTenants")).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Network(_)));
    }

    #[tokio::test]
    async fn test_headers_follow_session() {
        let (dispatcher, stub) = multi_tenant();
        stub.push_data(json!([]));
        stub.push_data(json!([]));

        dispatcher.call(ApiRequest::get("/getTenants")).await.unwrap();
        let sent = stub.last_request().unwrap();
        assert_eq!(sent.url, "https://api.example.com/getTenants");
        for name in ["Authorization", "BranchId", "CompanyID", "TenantId"] {
            assert_eq!(sent.header(name), None, "{} sent without a session", name);
        }

        dispatcher
            .session()
            .set_session("tok", "c1", "b1", "t1", None)
            .unwrap();
        dispatcher.call(ApiRequest::get("/getTenants")).await.unwrap();
        let sent = stub.last_request().unwrap();
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
        assert_eq!(sent.header("BranchId"), Some("b1"));
        assert_eq!(sent.header("CompanyID"), Some("c1"));
        assert_eq!(sent.header("TenantId"), Some("t1"));
    }

    #[tokio::test]
    async fn test_login_false_is_rejection_not_error() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, "false");
        stub.push(401, " false\n");
        stub.push(200, "");

        for _ in 0..3 {
            let outcome = dispatcher.login("0100", "wrong").await.unwrap();
            assert_eq!(outcome, LoginOutcome::CredentialsRejected);
        }
    }

    #[tokio::test]
    async fn test_login_grant_with_identifier_aliases() {
        let (dispatcher, stub) = multi_tenant();
        stub.push_json(json!({
            "token": "tok",
            "BranchID": 7,
            "CompanyID": "c1",
            "TenantId": "t1",
            "expiration": "2030-01-01T00:00:00Z"
        }));

        let LoginOutcome::Accepted(grant) = dispatcher.login("0100", "pw").await.unwrap() else {
            panic!("expected a grant");
        };
        assert_eq!(grant.token(), "tok");
        assert_eq!(grant.branch_id.as_deref(), Some("7"));
        assert_eq!(grant.company_id.as_deref(), Some("c1"));
        assert_eq!(grant.tenant_id.as_deref(), Some("t1"));
        assert_eq!(grant.expiration.as_deref(), Some("2030-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_login_sends_no_session_headers() {
        let (dispatcher, stub) = multi_tenant();
        dispatcher
            .session()
            .set_session("old", "c1", "b1", "t1", None)
            .unwrap();
        stub.push_json(json!({"token": "new"}));

        dispatcher.login("+20 100", "p&ss").await.unwrap();
        let sent = stub.last_request().unwrap();
        assert_eq!(
            sent.url,
            "https://api.example.com/Login?PhoneNo=%2B20%20100&Password=p%26ss"
        );
        assert_eq!(sent.header("Authorization"), None);
        assert_eq!(sent.header("TenantId"), None);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_login_errors() {
        let (dispatcher, stub) = multi_tenant();
        stub.push(200, "<html>");
        stub.push_json(json!({"expiration": "2030-01-01"}));
        stub.push(500, "");

        assert!(dispatcher.login("p", "x").await.unwrap_err().is_malformed());
        assert!(dispatcher.login("p", "x").await.unwrap_err().is_malformed());
        assert_eq!(
            dispatcher.login("p", "x").await.unwrap_err(),
            ConsoleError::transport(500, "Login failed")
        );
    }

    #[tokio::test]
    async fn test_call_as_reports_shape_mismatch_as_malformed() {
        let (dispatcher, stub) = multi_tenant();
        stub.push_data(json!("not a list"));

        let err = dispatcher
            .call_list::<Value>(ApiRequest::get("/getAgents"))
            .await
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let store = Arc::new(SessionStore::new(
            Arc::new(InMemoryKeyValueStore::new()),
            DeploymentProfile::MultiTenant,
        ));
        let result = Dispatcher::new(&ApiConfig::new("api"), store, Arc::new(StubTransport::new()));
        assert!(result.is_err());
    }
}
