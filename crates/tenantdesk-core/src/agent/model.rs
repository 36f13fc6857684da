//! Agent read model.

use crate::error::{ConsoleError, Result};
use crate::listing::Listable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A sales agent as returned by `getAgents` / `getAgent`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    #[serde(deserialize_with = "crate::nullable::string")]
    pub id: String,
    #[serde(deserialize_with = "crate::nullable::string")]
    pub agent_name: String,
    pub address: Option<String>,
    pub governorate: Option<String>,
    pub phone_number: Option<String>,
    pub whats_app_number: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub creation_date: Option<String>,
    #[serde(deserialize_with = "crate::nullable::boolean")]
    pub is_active: bool,
    pub tenant_id: Option<String>,
    pub branch_id: Option<String>,
}

/// Sortable agent columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentSortField {
    #[default]
    AgentName,
    PhoneNumber,
    Email,
    Governorate,
}

impl FromStr for AgentSortField {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "agentname" => Ok(Self::AgentName),
            "phone" | "phonenumber" => Ok(Self::PhoneNumber),
            "email" => Ok(Self::Email),
            "governorate" => Ok(Self::Governorate),
            other => Err(ConsoleError::invalid_input(format!(
                "unknown agent sort field '{}'",
                other
            ))),
        }
    }
}

impl Listable for Agent {
    type SortField = AgentSortField;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.agent_name.as_str()),
            self.phone_number.as_deref(),
            self.whats_app_number.as_deref(),
            self.email.as_deref(),
            self.governorate.as_deref(),
            self.address.as_deref(),
        ]
    }

    fn sort_value(&self, field: AgentSortField) -> Option<&str> {
        match field {
            AgentSortField::AgentName => Some(self.agent_name.as_str()),
            AgentSortField::PhoneNumber => self.phone_number.as_deref(),
            AgentSortField::Email => self.email.as_deref(),
            AgentSortField::Governorate => self.governorate.as_deref(),
        }
    }
}
