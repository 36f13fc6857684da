//! Requests against the console API and the context they are sent with.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tenantdesk_core::Result;
use tenantdesk_core::config::DeploymentProfile;
use tenantdesk_core::session::Session;

/// Header names the server matches exactly.
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const BRANCH_ID: &str = "BranchId";
    pub const COMPANY_ID: &str = "CompanyID";
    pub const TENANT_ID: &str = "TenantId";

    pub const JSON: &str = "application/json";
}

const DEFAULT_FALLBACK: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful call hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The envelope's `data` field (`null` when absent).
    Data,
    /// The whole parsed envelope; used by add/update/delete calls.
    Whole,
}

/// A query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Integer(n) => write!(f, "{}", n),
            QueryValue::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

/// One call against the API, before session headers are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Server-relative route, e.g. `/getTenants`.
    pub path: String,
    /// Query parameters in the order they were added.
    pub query: Vec<(String, QueryValue)>,
    pub body: Option<Value>,
    /// Shown when the server gives no usable error text.
    pub fallback_message: String,
    pub shape: ResponseShape,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            fallback_message: DEFAULT_FALLBACK.to_string(),
            shape: ResponseShape::Data,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A POST returning the whole envelope.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path).whole()
    }

    /// A DELETE returning the whole envelope.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path).whole()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body serialized from `body`.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn whole(mut self) -> Self {
        self.shape = ResponseShape::Whole;
        self
    }

    pub fn data(mut self) -> Self {
        self.shape = ResponseShape::Data;
        self
    }
}

/// A request ready for the wire: absolute URL, final headers, body.
///
/// Built fresh from the session for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestContext {
    /// Builds the context for `request` under `session`.
    ///
    /// `base_url` must already be normalized (no trailing slash). Tenant
    /// headers are only attached when `profile` carries tenant context, and
    /// a header is omitted rather than sent empty.
    pub fn build(
        base_url: &str,
        request: &ApiRequest,
        session: &Session,
        profile: DeploymentProfile,
    ) -> Self {
        let mut pairs = vec![(
            headers::CONTENT_TYPE.to_string(),
            headers::JSON.to_string(),
        )];

        if let Some(token) = session.token() {
            pairs.push((
                headers::AUTHORIZATION.to_string(),
                format!("Bearer {}", token),
            ));
        }
        if profile.carries_tenant_context() {
            for (name, value) in [
                (headers::BRANCH_ID, session.branch_id()),
                (headers::COMPANY_ID, session.company_id()),
                (headers::TENANT_ID, session.tenant_id()),
            ] {
                if let Some(value) = value {
                    pairs.push((name.to_string(), value.to_string()));
                }
            }
        }

        Self {
            method: request.method,
            url: build_url(base_url, &request.path, &request.query),
            headers: pairs,
            body: request.body.clone(),
        }
    }

    /// Value of the header `name`, matched exactly.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// `base` + `path` + `?k=v&...`, percent-encoding keys and values.
pub fn build_url(base: &str, path: &str, query: &[(String, QueryValue)]) -> String {
    let mut url = String::with_capacity(base.len() + path.len() + 16);
    url.push_str(base);
    if !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);

    for (idx, (key, value)) in query.iter().enumerate() {
        url.push(if idx == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(&value.to_string()));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenantdesk_core::session::TenantContext;

    const BASE: &str = "https://api.example.com";

    fn populated() -> Session {
        Session::with_context("tok", TenantContext::new("t1", "c1", "b1"), None)
    }

    #[test]
    fn test_build_url_encodes_query() {
        let request = ApiRequest::post("/Login")
            .query("PhoneNo", "+20 100")
            .query("Password", "p&ss=1");
        let ctx = RequestContext::build(BASE, &request, &Session::empty(), DeploymentProfile::MultiTenant);
        assert_eq!(
            ctx.url,
            "https://api.example.com/Login?PhoneNo=%2B20%20100&Password=p%26ss%3D1"
        );
    }

    #[test]
    fn test_build_url_numbers_and_missing_slash() {
        let query = vec![("Page".to_string(), QueryValue::from(2u32))];
        assert_eq!(build_url(BASE, "getAgents", &query), "https://api.example.com/getAgents?Page=2");
        assert_eq!(build_url(BASE, "/getAgents", &[]), "https://api.example.com/getAgents");
    }

    #[test]
    fn test_empty_session_sends_only_content_type() {
        let ctx = RequestContext::build(
            BASE,
            &ApiRequest::get("/getTenants"),
            &Session::empty(),
            DeploymentProfile::MultiTenant,
        );
        assert_eq!(ctx.headers, vec![("Content-Type".to_string(), "application/json".to_string())]);
        assert_eq!(ctx.header(headers::AUTHORIZATION), None);
    }

    #[test]
    fn test_populated_session_sends_exact_headers() {
        let ctx = RequestContext::build(
            BASE,
            &ApiRequest::get("/getTenants"),
            &populated(),
            DeploymentProfile::MultiTenant,
        );
        assert_eq!(ctx.header("Authorization"), Some("Bearer tok"));
        assert_eq!(ctx.header("BranchId"), Some("b1"));
        assert_eq!(ctx.header("CompanyID"), Some("c1"));
        assert_eq!(ctx.header("TenantId"), Some("t1"));
        // Names are matched exactly, not case-folded.
        assert_eq!(ctx.header("companyid"), None);
    }

    #[test]
    fn test_simple_admin_profile_sends_bearer_only() {
        let ctx = RequestContext::build(
            BASE,
            &ApiRequest::get("/getTenants"),
            &populated(),
            DeploymentProfile::SimpleAdmin,
        );
        assert_eq!(ctx.header("Authorization"), Some("Bearer tok"));
        assert_eq!(ctx.header("TenantId"), None);
        assert_eq!(ctx.headers.len(), 2);
    }

    #[test]
    fn test_json_body_and_shape() {
        let request = ApiRequest::post("/addTenant")
            .json(&serde_json::json!({"TenantName": "Acme"}))
            .unwrap();
        assert_eq!(request.shape, ResponseShape::Whole);
        assert_eq!(request.body.unwrap()["TenantName"], "Acme");
        assert_eq!(ApiRequest::get("/x").shape, ResponseShape::Data);
    }
}
