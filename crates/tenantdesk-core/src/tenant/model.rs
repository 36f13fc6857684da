//! Tenant and branch read models.

use crate::error::{ConsoleError, Result};
use crate::listing::Listable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A customer organization as returned by `getTenants`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tenant {
    #[serde(deserialize_with = "crate::nullable::string")]
    pub id: String,
    #[serde(deserialize_with = "crate::nullable::string")]
    pub tenant_name: String,
    #[serde(deserialize_with = "crate::nullable::string")]
    pub tenant_code: String,
    #[serde(deserialize_with = "crate::nullable::string")]
    pub db_name: String,
    pub facility_name: Option<String>,
    pub address: Option<String>,
    pub governorate: Option<String>,
    pub phone_number: Option<String>,
    pub whats_app_number: Option<String>,
    pub email: Option<String>,
    pub responsible_name: Option<String>,
    pub activity: Option<String>,
    pub creation_date: Option<String>,
    #[serde(deserialize_with = "crate::nullable::boolean")]
    pub is_active: bool,
}

/// Sortable tenant columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TenantSortField {
    #[default]
    TenantName,
    TenantCode,
    DbName,
    PhoneNumber,
    Email,
}

impl FromStr for TenantSortField {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "tenantname" => Ok(Self::TenantName),
            "code" | "tenantcode" => Ok(Self::TenantCode),
            "db" | "dbname" => Ok(Self::DbName),
            "phone" | "phonenumber" => Ok(Self::PhoneNumber),
            "email" => Ok(Self::Email),
            other => Err(ConsoleError::invalid_input(format!(
                "unknown tenant sort field '{}'",
                other
            ))),
        }
    }
}

impl Listable for Tenant {
    type SortField = TenantSortField;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.tenant_name.as_str()),
            Some(self.tenant_code.as_str()),
            Some(self.db_name.as_str()),
            self.phone_number.as_deref(),
            self.email.as_deref(),
            self.address.as_deref(),
            self.governorate.as_deref(),
        ]
    }

    fn sort_value(&self, field: TenantSortField) -> Option<&str> {
        match field {
            TenantSortField::TenantName => Some(self.tenant_name.as_str()),
            TenantSortField::TenantCode => Some(self.tenant_code.as_str()),
            TenantSortField::DbName => Some(self.db_name.as_str()),
            TenantSortField::PhoneNumber => self.phone_number.as_deref(),
            TenantSortField::Email => self.email.as_deref(),
        }
    }
}

/// A branch of a tenant as returned by `GetBranchs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branch {
    #[serde(deserialize_with = "crate::nullable::string")]
    pub id: String,
    pub branch_id: Option<String>,
    #[serde(deserialize_with = "crate::nullable::string")]
    pub name: String,
    pub address: Option<String>,
    pub governate: Option<String>,
    pub phone: Option<String>,
    pub expire_date: Option<String>,
    pub tenant_id: Option<String>,
    #[serde(deserialize_with = "crate::nullable::boolean")]
    pub is_active: bool,
}

impl Branch {
    /// Whether this branch is listed under `tenant_id`.
    ///
    /// Older records carry the owning tenant in `id` rather than `tenantId`,
    /// so both are checked.
    pub fn belongs_to(&self, tenant_id: &str) -> bool {
        self.id == tenant_id || self.tenant_id.as_deref() == Some(tenant_id)
    }
}
