use super::{Banners, require_session};
use tenantdesk_core::Result;
use tenantdesk_core::listing::{ListQuery, SortDirection};
use tenantdesk_core::user::{RegisterUserForm, User, UserSortField};
use tenantdesk_interaction::ConsoleApi;
use tracing::debug;

/// Login accounts of the signed-in agent, plus the registration form.
pub struct UsersScreen {
    api: ConsoleApi,
    users: Vec<User>,
    pub form: RegisterUserForm,
    pub query: ListQuery<UserSortField>,
    pub banners: Banners,
}

impl UsersScreen {
    pub fn new(api: ConsoleApi) -> Self {
        Self {
            api,
            users: Vec::new(),
            form: RegisterUserForm::default(),
            query: ListQuery::new(UserSortField::UserName),
            banners: Banners::default(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        require_session(&self.api)?;
        self.banners.error = None;
        let result = self.api.get_users().await;
        self.users = self.banners.record(result, "Failed to load users")?;
        debug!(count = self.users.len(), "Users loaded");
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn visible_users(&self) -> Vec<&User> {
        self.query.apply(&self.users)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn toggle_sort(&mut self, field: UserSortField) {
        self.query.toggle_sort(field);
    }

    pub fn sort_by(&mut self, field: UserSortField, direction: SortDirection) {
        self.query.sort_by = field;
        self.query.direction = direction;
    }

    /// Registers `self.form`, refetches, and resets the form.
    ///
    /// On failure the form is kept so it can be corrected.
    pub async fn register(&mut self) -> Result<()> {
        require_session(&self.api)?;
        self.banners.clear();
        let result = self.api.register_user(&self.form).await;
        self.banners.record(result, "Failed to register user")?;
        self.banners.succeed("User registered successfully");
        // The refetch reports its own failure in the banner.
        let _ = self.load().await;
        self.form = RegisterUserForm::default();
        Ok(())
    }
}
