use super::{Banners, FormMode, require_session};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tenantdesk_core::Result;
use tenantdesk_core::listing::{ListQuery, SortDirection};
use tenantdesk_core::tenant::{Branch, BranchForm, Tenant, TenantForm, TenantSortField};
use tenantdesk_interaction::ConsoleApi;
use tracing::debug;

/// Tenants with their branches nested as expandable rows, plus the
/// deleted-tenants view.
pub struct TenantsScreen {
    api: ConsoleApi,
    tenants: Vec<Tenant>,
    deleted: Vec<Tenant>,
    branches: Vec<Branch>,
    expanded: BTreeSet<String>,
    pub query: ListQuery<TenantSortField>,
    pub banners: Banners,
}

impl TenantsScreen {
    pub fn new(api: ConsoleApi) -> Self {
        Self {
            api,
            tenants: Vec::new(),
            deleted: Vec::new(),
            branches: Vec::new(),
            expanded: BTreeSet::new(),
            query: ListQuery::new(TenantSortField::TenantName),
            banners: Banners::default(),
        }
    }

    /// Loads tenants and branches.
    pub async fn load(&mut self) -> Result<()> {
        self.load_tenants().await?;
        self.load_branches().await
    }

    pub async fn load_tenants(&mut self) -> Result<()> {
        require_session(&self.api)?;
        self.banners.error = None;
        let result = self.api.get_tenants().await;
        self.tenants = self.banners.record(result, "Failed to load tenants")?;
        debug!(count = self.tenants.len(), "Tenants loaded");
        Ok(())
    }

    pub async fn load_branches(&mut self) -> Result<()> {
        require_session(&self.api)?;
        let result = self.api.get_branches().await;
        self.branches = self.banners.record(result, "Failed to load branches")?;
        debug!(count = self.branches.len(), "Branches loaded");
        Ok(())
    }

    pub async fn load_deleted(&mut self) -> Result<()> {
        require_session(&self.api)?;
        self.banners.error = None;
        let result = self.api.get_deleted_tenants().await;
        self.deleted = self.banners.record(result, "Failed to load deleted tenants")?;
        Ok(())
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Tenants after search and sort.
    pub fn visible_tenants(&self) -> Vec<&Tenant> {
        self.query.apply(&self.tenants)
    }

    /// Deleted tenants after search and sort.
    pub fn visible_deleted(&self) -> Vec<&Tenant> {
        self.query.apply(&self.deleted)
    }

    pub fn branches_for(&self, tenant_id: &str) -> Vec<&Branch> {
        self.branches
            .iter()
            .filter(|branch| branch.belongs_to(tenant_id))
            .collect()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn toggle_sort(&mut self, field: TenantSortField) {
        self.query.toggle_sort(field);
    }

    pub fn sort_by(&mut self, field: TenantSortField, direction: SortDirection) {
        self.query.sort_by = field;
        self.query.direction = direction;
    }

    pub fn toggle_row(&mut self, tenant_id: &str) {
        if !self.expanded.remove(tenant_id) {
            self.expanded.insert(tenant_id.to_string());
        }
    }

    pub fn is_expanded(&self, tenant_id: &str) -> bool {
        self.expanded.contains(tenant_id)
    }

    pub fn new_tenant_form(&self, today: NaiveDate) -> TenantForm {
        TenantForm::blank(today)
    }

    pub fn edit_tenant_form(&self, tenant: &Tenant, today: NaiveDate) -> TenantForm {
        TenantForm::from_tenant(tenant, today)
    }

    pub fn new_branch_form(&self, tenant_id: &str, today: NaiveDate) -> BranchForm {
        BranchForm::blank(tenant_id, today)
    }

    pub fn edit_branch_form(&self, branch: &Branch, tenant_id: &str, today: NaiveDate) -> BranchForm {
        BranchForm::from_branch(branch, tenant_id, today)
    }

    /// Adds or updates a tenant, then refetches the tenant list.
    pub async fn save_tenant(&mut self, form: &TenantForm, mode: FormMode) -> Result<()> {
        require_session(&self.api)?;
        self.banners.clear();
        let (result, done) = match mode {
            FormMode::Add => (self.api.add_tenant(form).await, "Tenant added successfully"),
            FormMode::Edit => (self.api.update_tenant(form).await, "Tenant updated successfully"),
        };
        self.banners.record(result, "Failed to save tenant")?;
        self.banners.succeed(done);
        self.refetch_tenants().await;
        Ok(())
    }

    /// Deletes a tenant, then refetches the tenant list.
    pub async fn delete_tenant(&mut self, tenant_id: &str) -> Result<()> {
        require_session(&self.api)?;
        self.banners.clear();
        let result = self.api.delete_tenant(tenant_id).await;
        self.banners.record(result, "Failed to delete tenant")?;
        self.banners.succeed("Tenant deleted successfully");
        self.refetch_tenants().await;
        Ok(())
    }

    /// Adds or updates a branch, then refetches branches. A new branch's
    /// tenant row is expanded so the branch is visible.
    pub async fn save_branch(&mut self, form: &BranchForm, mode: FormMode) -> Result<()> {
        require_session(&self.api)?;
        self.banners.clear();
        let (result, done) = match mode {
            FormMode::Add => (self.api.add_branch(form).await, "Branch added successfully"),
            FormMode::Edit => (self.api.update_branch(form).await, "Branch updated successfully"),
        };
        self.banners.record(result, "Failed to save branch")?;
        self.banners.succeed(done);
        // The refetch reports its own failure in the banner.
        let _ = self.load_branches().await;
        if mode == FormMode::Add && !form.tenant_id.is_empty() {
            self.expanded.insert(form.tenant_id.clone());
        }
        Ok(())
    }

    async fn refetch_tenants(&mut self) {
        // The refetch reports its own failure in the banner.
        let _ = self.load_tenants().await;
    }
}
