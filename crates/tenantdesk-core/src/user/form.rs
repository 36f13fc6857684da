//! Registration request body.

use serde::{Deserialize, Serialize};

/// Agent new accounts are registered under unless the operator picks one.
pub const DEFAULT_AGENT_ID: &str = "Agent1";

/// Body of `register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RegisterUserForm {
    pub user_name: String,
    pub password: String,
    pub phone_no: String,
    pub email: String,
    pub agent_id: String,
}

impl Default for RegisterUserForm {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            password: String::new(),
            phone_no: String::new(),
            email: String::new(),
            agent_id: DEFAULT_AGENT_ID.to_string(),
        }
    }
}
