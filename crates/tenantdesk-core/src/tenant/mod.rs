//! Tenant domain module: tenants and the branches listed under them.

mod form;
mod model;

pub use form::{BranchForm, TenantForm};
pub use model::{Branch, Tenant, TenantSortField};
