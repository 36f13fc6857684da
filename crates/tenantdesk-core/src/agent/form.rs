//! Agent request body for add/update calls.

use super::model::Agent;
use crate::form::{date_part, format_date, text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `addAgent` / `updateAgent`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentForm {
    pub id: String,
    pub agent_name: String,
    pub creation_date: String,
    pub address: String,
    pub phone_number: String,
    pub whats_app_number: String,
    pub email: String,
    pub governorate: String,
    pub notes: String,
}

impl AgentForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            creation_date: format_date(today),
            ..Self::default()
        }
    }

    pub fn from_agent(agent: &Agent, today: NaiveDate) -> Self {
        Self {
            id: agent.id.clone(),
            agent_name: agent.agent_name.clone(),
            creation_date: date_part(agent.creation_date.as_deref(), today),
            address: text(&agent.address),
            phone_number: text(&agent.phone_number),
            whats_app_number: text(&agent.whats_app_number),
            email: text(&agent.email),
            governorate: text(&agent.governorate),
            notes: text(&agent.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_form_from_record() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let agent = Agent {
            id: "a1".into(),
            agent_name: "Mona".into(),
            notes: Some("vip".into()),
            ..Agent::default()
        };
        let form = AgentForm::from_agent(&agent, today);
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["Id"], json!("a1"));
        assert_eq!(value["AgentName"], json!("Mona"));
        assert_eq!(value["Notes"], json!("vip"));
        assert_eq!(value["CreationDate"], json!("2026-03-01"));
    }
}
