//! Tenant and branch request bodies for add/update calls.

use super::model::{Branch, Tenant};
use crate::form::{date_part, default_branch_expiry, format_date, text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `addTenant` / `updateTenant`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TenantForm {
    pub id: String,
    pub tenant_name: String,
    pub tenant_code: String,
    pub creation_date: String,
    pub address: String,
    pub phone_number: String,
    pub whats_app_number: String,
    pub email: String,
    pub governorate: String,
    pub facility_name: String,
    pub activity: String,
    pub responsible_name: String,
}

impl TenantForm {
    /// An empty add form created on `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            creation_date: format_date(today),
            ..Self::default()
        }
    }

    /// An edit form pre-filled from `tenant`.
    pub fn from_tenant(tenant: &Tenant, today: NaiveDate) -> Self {
        Self {
            id: tenant.id.clone(),
            tenant_name: tenant.tenant_name.clone(),
            tenant_code: tenant.tenant_code.clone(),
            creation_date: date_part(tenant.creation_date.as_deref(), today),
            address: text(&tenant.address),
            phone_number: text(&tenant.phone_number),
            whats_app_number: text(&tenant.whats_app_number),
            email: text(&tenant.email),
            governorate: text(&tenant.governorate),
            facility_name: text(&tenant.facility_name),
            activity: text(&tenant.activity),
            responsible_name: text(&tenant.responsible_name),
        }
    }
}

/// Body of `addBranch` / `updateBranch`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BranchForm {
    pub id: String,
    pub name: String,
    pub expire_date: String,
    pub address: String,
    pub governate: String,
    pub phone: String,
    pub tenant_id: String,
    pub branch_id: String,
}

impl BranchForm {
    /// An add form for a new branch of `tenant_id`.
    ///
    /// The API reads the owning tenant from `Id` on add, so it is set too.
    pub fn blank(tenant_id: &str, today: NaiveDate) -> Self {
        Self {
            id: tenant_id.to_string(),
            expire_date: format_date(default_branch_expiry(today)),
            tenant_id: tenant_id.to_string(),
            ..Self::default()
        }
    }

    /// An edit form pre-filled from `branch`, listed under `tenant_id`.
    pub fn from_branch(branch: &Branch, tenant_id: &str, today: NaiveDate) -> Self {
        Self {
            id: branch.id.clone(),
            name: branch.name.clone(),
            expire_date: date_part(
                branch.expire_date.as_deref(),
                default_branch_expiry(today),
            ),
            address: text(&branch.address),
            governate: text(&branch.governate),
            phone: text(&branch.phone),
            tenant_id: branch
                .tenant_id
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| tenant_id.to_string()),
            branch_id: text(&branch.branch_id),
        }
    }
}
