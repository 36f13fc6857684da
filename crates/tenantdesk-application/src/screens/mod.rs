//! Screen-level state for the console's list views.
//!
//! Each screen owns its records, a [`ListQuery`](tenantdesk_core::listing::ListQuery)
//! for search and sort, and a pair of banners. Every successful mutation is
//! followed by an awaited refetch; a failed operation sets the error banner
//! and leaves the loaded records untouched.

mod agents;
mod tenants;
mod users;

pub use agents::AgentsScreen;
pub use tenants::TenantsScreen;
pub use users::UsersScreen;

use tenantdesk_core::{ConsoleError, Result};
use tenantdesk_interaction::ConsoleApi;
use tracing::warn;

/// Whether a form submits as a new record or an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// The error and success messages a screen shows above its list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banners {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Banners {
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Shows `err`, or `fallback` if the error renders empty.
    pub fn fail(&mut self, err: &ConsoleError, fallback: &str) {
        let message = err.to_string();
        self.error = Some(if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        });
    }

    /// Passes `result` through, recording an error in the banner.
    pub(crate) fn record<T>(&mut self, result: Result<T>, fallback: &str) -> Result<T> {
        if let Err(err) = &result {
            warn!(error = %err, "Screen operation failed");
            self.fail(err, fallback);
        }
        result
    }
}

/// Screens only load while signed in.
pub(crate) fn require_session(api: &ConsoleApi) -> Result<()> {
    if api.dispatcher().session().is_authenticated() {
        Ok(())
    } else {
        Err(ConsoleError::NotAuthenticated)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use tenantdesk_core::config::{ApiConfig, DeploymentProfile};
    use tenantdesk_core::session::SessionStore;
    use tenantdesk_core::storage::InMemoryKeyValueStore;
    use tenantdesk_interaction::{ConsoleApi, Dispatcher, StubTransport};

    /// A signed-in console over a stub transport.
    pub fn signed_in() -> (ConsoleApi, Arc<StubTransport>) {
        let (api, stub) = signed_out();
        api.dispatcher()
            .session()
            .set_session("tok", "c1", "b1", "t1", None)
            .unwrap();
        (api, stub)
    }

    pub fn signed_out() -> (ConsoleApi, Arc<StubTransport>) {
        let session = Arc::new(SessionStore::new(
            Arc::new(InMemoryKeyValueStore::new()),
            DeploymentProfile::MultiTenant,
        ));
        let stub = Arc::new(StubTransport::new());
        let dispatcher =
            Dispatcher::new(&ApiConfig::new("https://api.example.com"), session, stub.clone())
                .unwrap();
        (ConsoleApi::new(Arc::new(dispatcher)), stub)
    }
}
