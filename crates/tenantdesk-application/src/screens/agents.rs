use super::{Banners, FormMode, require_session};
use chrono::NaiveDate;
use tenantdesk_core::Result;
use tenantdesk_core::agent::{Agent, AgentForm, AgentSortField};
use tenantdesk_core::listing::{ListQuery, SortDirection};
use tenantdesk_interaction::ConsoleApi;
use tracing::debug;

pub struct AgentsScreen {
    api: ConsoleApi,
    agents: Vec<Agent>,
    pub query: ListQuery<AgentSortField>,
    pub banners: Banners,
}

impl AgentsScreen {
    pub fn new(api: ConsoleApi) -> Self {
        Self {
            api,
            agents: Vec::new(),
            query: ListQuery::new(AgentSortField::AgentName),
            banners: Banners::default(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        require_session(&self.api)?;
        self.banners.error = None;
        let result = self.api.get_agents().await;
        self.agents = self.banners.record(result, "Failed to load agents")?;
        debug!(count = self.agents.len(), "Agents loaded");
        Ok(())
    }

    /// Fetches one agent for the edit form.
    pub async fn get_agent(&mut self, agent_id: &str) -> Result<Agent> {
        require_session(&self.api)?;
        let result = self.api.get_agent(agent_id).await;
        self.banners.record(result, "Failed to load agent")
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn visible_agents(&self) -> Vec<&Agent> {
        self.query.apply(&self.agents)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn toggle_sort(&mut self, field: AgentSortField) {
        self.query.toggle_sort(field);
    }

    pub fn sort_by(&mut self, field: AgentSortField, direction: SortDirection) {
        self.query.sort_by = field;
        self.query.direction = direction;
    }

    pub fn new_form(&self, today: NaiveDate) -> AgentForm {
        AgentForm::blank(today)
    }

    pub fn edit_form(&self, agent: &Agent, today: NaiveDate) -> AgentForm {
        AgentForm::from_agent(agent, today)
    }

    /// Adds or updates an agent, then refetches the list.
    pub async fn save(&mut self, form: &AgentForm, mode: FormMode) -> Result<()> {
        require_session(&self.api)?;
        self.banners.clear();
        let (result, done) = match mode {
            FormMode::Add => (self.api.add_agent(form).await, "Agent added successfully"),
            FormMode::Edit => (self.api.update_agent(form).await, "Agent updated successfully"),
        };
        self.banners.record(result, "Failed to save agent")?;
        self.banners.succeed(done);
        // The refetch reports its own failure in the banner.
        let _ = self.load().await;
        Ok(())
    }
}
