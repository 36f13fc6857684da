//! Console user read model.

use crate::error::{ConsoleError, Result};
use crate::listing::Listable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A login account as returned by `getAllUsersByAgentId`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(deserialize_with = "crate::nullable::string")]
    pub id: String,
    #[serde(deserialize_with = "crate::nullable::string")]
    pub user_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub agent_id: Option<String>,
    pub branch_id: Option<String>,
    #[serde(deserialize_with = "crate::nullable::boolean")]
    pub email_confirmed: bool,
    #[serde(deserialize_with = "crate::nullable::boolean")]
    pub phone_number_confirmed: bool,
    #[serde(deserialize_with = "crate::nullable::boolean")]
    pub lockout_enabled: bool,
    #[serde(deserialize_with = "crate::nullable::number")]
    pub access_failed_count: u32,
}

/// Sortable user columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    UserName,
    Email,
    PhoneNumber,
}

impl FromStr for UserSortField {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "username" => Ok(Self::UserName),
            "email" => Ok(Self::Email),
            "phone" | "phonenumber" => Ok(Self::PhoneNumber),
            other => Err(ConsoleError::invalid_input(format!(
                "unknown user sort field '{}'",
                other
            ))),
        }
    }
}

impl Listable for User {
    type SortField = UserSortField;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.user_name.as_str()),
            self.email.as_deref(),
            self.phone_number.as_deref(),
            self.agent_id.as_deref(),
        ]
    }

    fn sort_value(&self, field: UserSortField) -> Option<&str> {
        match field {
            UserSortField::UserName => Some(self.user_name.as_str()),
            UserSortField::Email => self.email.as_deref(),
            UserSortField::PhoneNumber => self.phone_number.as_deref(),
        }
    }
}
