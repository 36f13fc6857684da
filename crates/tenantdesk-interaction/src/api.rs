//! Typed wrappers for every console endpoint.

use crate::dispatcher::{Dispatcher, LoginOutcome};
use crate::request::ApiRequest;
use serde_json::Value;
use std::sync::Arc;
use tenantdesk_core::Result;
use tenantdesk_core::agent::{Agent, AgentForm};
use tenantdesk_core::tenant::{Branch, BranchForm, Tenant, TenantForm};
use tenantdesk_core::user::{RegisterUserForm, User};

/// The console's view of the remote API.
///
/// Each method maps to one endpoint and carries the message shown when the
/// server fails without saying why.
#[derive(Clone)]
pub struct ConsoleApi {
    dispatcher: Arc<Dispatcher>,
}

impl ConsoleApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginOutcome> {
        self.dispatcher.login(phone, password).await
    }

    // Tenants

    pub async fn get_tenants(&self) -> Result<Vec<Tenant>> {
        self.dispatcher
            .call_list(ApiRequest::get("/getTenants").fallback("Failed to fetch tenants"))
            .await
    }

    pub async fn get_deleted_tenants(&self) -> Result<Vec<Tenant>> {
        self.dispatcher
            .call_list(
                ApiRequest::get("/getDeletedTenants").fallback("Failed to fetch deleted tenants"),
            )
            .await
    }

    pub async fn add_tenant(&self, form: &TenantForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/addTenant")
                    .json(form)?
                    .fallback("Failed to add tenant"),
            )
            .await
    }

    pub async fn update_tenant(&self, form: &TenantForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/updateTenant")
                    .json(form)?
                    .fallback("Failed to update tenant"),
            )
            .await
    }

    pub async fn delete_tenant(&self, tenant_id: &str) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::delete("/deleteTenant")
                    .query("TenantID", tenant_id)
                    .fallback("Failed to delete tenant"),
            )
            .await
    }

    // Branches

    pub async fn get_branches(&self) -> Result<Vec<Branch>> {
        self.dispatcher
            .call_list(ApiRequest::get("/GetBranchs").fallback("Failed to fetch branches"))
            .await
    }

    pub async fn get_branch(&self, branch_id: &str) -> Result<Branch> {
        self.dispatcher
            .call_as(
                ApiRequest::get("/getBranch")
                    .query("BranchId", branch_id)
                    .fallback("Failed to fetch branch"),
            )
            .await
    }

    pub async fn add_branch(&self, form: &BranchForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/addBranch")
                    .json(form)?
                    .fallback("Failed to add branch"),
            )
            .await
    }

    pub async fn update_branch(&self, form: &BranchForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/updateBranch")
                    .json(form)?
                    .fallback("Failed to update branch"),
            )
            .await
    }

    // Agents

    pub async fn get_agents(&self) -> Result<Vec<Agent>> {
        self.dispatcher
            .call_list(ApiRequest::get("/getAgents").fallback("Failed to fetch agents"))
            .await
    }

    pub async fn get_agent(&self, agent_id: &str) -> Result<Agent> {
        self.dispatcher
            .call_as(
                ApiRequest::get("/getAgent")
                    .query("AgentID", agent_id)
                    .fallback("Failed to fetch agent"),
            )
            .await
    }

    pub async fn add_agent(&self, form: &AgentForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/addAgent")
                    .json(form)?
                    .fallback("Failed to add agent"),
            )
            .await
    }

    pub async fn update_agent(&self, form: &AgentForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/updateAgent")
                    .json(form)?
                    .fallback("Failed to update agent"),
            )
            .await
    }

    // Users

    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.dispatcher
            .call_list(ApiRequest::get("/getAllUsersByAgentId").fallback("Failed to fetch users"))
            .await
    }

    pub async fn register_user(&self, form: &RegisterUserForm) -> Result<Value> {
        self.dispatcher
            .call(
                ApiRequest::post("/register")
                    .json(form)?
                    .fallback("Failed to register user"),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::stub::StubTransport;
    use serde_json::json;
    use tenantdesk_core::ConsoleError;
    use tenantdesk_core::config::{ApiConfig, DeploymentProfile};
    use tenantdesk_core::session::SessionStore;
    use tenantdesk_core::storage::InMemoryKeyValueStore;

    fn api() -> (ConsoleApi, Arc<StubTransport>) {
        let store = Arc::new(SessionStore::new(
            Arc::new(InMemoryKeyValueStore::new()),
            DeploymentProfile::MultiTenant,
        ));
        store.set_session("tok", "c1", "b1", "t1", None).unwrap();
        let stub = Arc::new(StubTransport::new());
        let dispatcher =
            Dispatcher::new(&ApiConfig::new("https://api.example.com"), store, stub.clone())
                .unwrap();
        (ConsoleApi::new(Arc::new(dispatcher)), stub)
    }

    #[tokio::test]
    async fn test_get_tenants_decodes_list() {
        let (api, stub) = api();
        stub.push_data(json!([
            {"id": "t1", "tenantName": "Acme", "tenantCode": "AC", "dbName": "acme"},
            {"id": "t2", "tenantName": "Globex", "tenantCode": "GX", "dbName": "globex"}
        ]));

        let tenants = api.get_tenants().await.unwrap();
        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants[1].tenant_name, "Globex");

        let sent = stub.last_request().unwrap();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://api.example.com/getTenants");
    }

    #[tokio::test]
    async fn test_delete_tenant_uses_query() {
        let (api, stub) = api();
        stub.push_json(json!({"isvalid": true}));

        api.delete_tenant("t 1").await.unwrap();
        let sent = stub.last_request().unwrap();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "https://api.example.com/deleteTenant?TenantID=t%201");
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn test_add_branch_posts_pascal_case_body() {
        let (api, stub) = api();
        stub.push_json(json!({"isvalid": true, "data": {"id": "b9"}}));

        let form = BranchForm {
            name: "Downtown".into(),
            ..BranchForm::default()
        };
        let result = api.add_branch(&form).await.unwrap();
        assert_eq!(result["data"]["id"], json!("b9"));

        let sent = stub.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.body.unwrap()["Name"], json!("Downtown"));
    }

    #[tokio::test]
    async fn test_endpoint_fallback_messages() {
        let (api, stub) = api();
        stub.push(500, "");
        stub.push_json(json!({"isvalid": false}));

        assert_eq!(
            api.get_agents().await.unwrap_err(),
            ConsoleError::transport(500, "Failed to fetch agents")
        );
        assert_eq!(
            api.register_user(&RegisterUserForm::default()).await.unwrap_err(),
            ConsoleError::domain("Failed to register user")
        );
    }

    #[tokio::test]
    async fn test_get_agent_and_branch_by_id() {
        let (api, stub) = api();
        stub.push_data(json!({"id": "a1", "agentName": "Mona"}));
        stub.push_data(json!({"id": "b1", "name": "Downtown", "tenantId": "t1"}));

        let agent = api.get_agent("a1").await.unwrap();
        assert_eq!(agent.agent_name, "Mona");
        assert_eq!(
            stub.last_request().unwrap().url,
            "https://api.example.com/getAgent?AgentID=a1"
        );

        let branch = api.get_branch("b1").await.unwrap();
        assert!(branch.belongs_to("t1"));
        assert_eq!(
            stub.last_request().unwrap().url,
            "https://api.example.com/getBranch?BranchId=b1"
        );
    }

    #[tokio::test]
    async fn test_get_agent_without_data_reports_fallback() {
        let (api, stub) = api();
        stub.push_json(json!({"isvalid": true, "data": null}));

        assert_eq!(
            api.get_agent("a1").await.unwrap_err(),
            ConsoleError::domain("Failed to fetch agent")
        );
    }
}
