//! Wiring from config to a ready-to-use API client.

use anyhow::{Result, bail};
use std::sync::Arc;
use tenantdesk_application::AuthUseCase;
use tenantdesk_core::ConsoleError;
use tenantdesk_core::config::ConsoleConfig;
use tenantdesk_core::session::{RestoreOutcome, SessionStore};
use tenantdesk_core::storage::KeyValueStore;
use tenantdesk_infrastructure::{ConsolePaths, FileKeyValueStore};
use tenantdesk_interaction::{ConsoleApi, Dispatcher, ReqwestTransport, Transport};
use tracing::debug;

/// The API client and the use cases built on it.
struct Remote {
    api: ConsoleApi,
    auth: AuthUseCase,
}

/// The local session plus, when the API is configured, the remote side.
///
/// Commands that only touch the stored session work without an API URL.
pub struct Console {
    session: Arc<SessionStore>,
    remote: std::result::Result<Remote, ConsoleError>,
}

impl Console {
    /// Opens the console over the per-user session file.
    pub fn open(config: &ConsoleConfig) -> Result<Self> {
        let session_file = ConsolePaths::session_file()?;
        debug!(path = %session_file.display(), "Using session file");
        Ok(Self::with_parts(
            config,
            Arc::new(FileKeyValueStore::new(session_file)),
            Arc::new(ReqwestTransport::new()),
        ))
    }

    /// Session keys and remember-me preferences share `storage`.
    pub fn with_parts(
        config: &ConsoleConfig,
        storage: Arc<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage.clone(), config.profile));
        let remote = Dispatcher::new(&config.api, session.clone(), transport).map(|dispatcher| {
            let api = ConsoleApi::new(Arc::new(dispatcher));
            let auth = AuthUseCase::new(api.clone(), storage);
            Remote { api, auth }
        });
        if let Err(err) = &remote {
            debug!(error = %err, "API not configured");
        }
        Self { session, remote }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> Result<&ConsoleApi> {
        Ok(&self.remote()?.api)
    }

    pub fn auth(&self) -> Result<&AuthUseCase> {
        Ok(&self.remote()?.auth)
    }

    fn remote(&self) -> Result<&Remote> {
        self.remote
            .as_ref()
            .map_err(|err| anyhow::Error::from(err.clone()))
    }

    /// Restores the stored session, failing with a login prompt when there
    /// is none or it has expired.
    pub fn require_session(&self) -> Result<()> {
        match self.session.restore()? {
            RestoreOutcome::Restored => Ok(()),
            RestoreOutcome::Expired => {
                bail!("Session expired. Run `tenantdesk login` to sign in again.")
            }
            RestoreOutcome::Empty => bail!("Not signed in. Run `tenantdesk login` first."),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tenantdesk_core::config::ApiConfig;
    use tenantdesk_core::storage::InMemoryKeyValueStore;
    use tenantdesk_interaction::StubTransport;

    pub struct Fixture {
        pub console: Console,
        pub stub: Arc<StubTransport>,
        pub storage: Arc<InMemoryKeyValueStore>,
    }

    pub fn fixture() -> Fixture {
        with_config(ConsoleConfig {
            api: ApiConfig::new("https://api.example.com"),
            ..ConsoleConfig::default()
        })
    }

    pub fn with_config(config: ConsoleConfig) -> Fixture {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let stub = Arc::new(StubTransport::new());
        let console = Console::with_parts(&config, storage.clone(), stub.clone());
        Fixture {
            console,
            stub,
            storage,
        }
    }

    /// A fixture whose storage already holds a live multi-tenant session.
    pub fn signed_in() -> Fixture {
        let f = fixture();
        for (key, value) in [
            ("access_token", "tok"),
            ("company_id", "c1"),
            ("branch_id", "b1"),
            ("tenant_id", "t1"),
        ] {
            f.storage.set(key, value).unwrap();
        }
        f
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use tenantdesk_core::storage::KeyValueStore;
    use tenantdesk_core::config::ConsoleConfig;

    #[test]
    fn test_require_session_without_login() {
        let f = fixture();
        let err = f.console.require_session().unwrap_err();
        assert!(err.to_string().contains("Not signed in"));
    }

    #[test]
    fn test_require_session_expired_prompts_login() {
        let f = signed_in();
        f.storage
            .set("token_expiration", "2001-01-01T00:00:00Z")
            .unwrap();

        let err = f.console.require_session().unwrap_err();
        assert!(err.to_string().contains("Session expired"));
        assert!(!f.console.session().is_authenticated());
    }

    #[test]
    fn test_require_session_restores_stored_session() {
        let f = signed_in();
        f.console.require_session().unwrap();
        assert!(f.console.session().is_authenticated());
    }

    #[test]
    fn test_session_works_without_api_url() {
        let f = with_config(ConsoleConfig::default());
        f.storage.set("access_token", "tok").unwrap();

        assert!(f.console.require_session().is_ok());
        let err = f.console.api().err().unwrap();
        assert!(err.to_string().contains("API base URL is not set"));
        assert!(f.console.auth().is_err());
    }
}
