use super::console::Console;
use super::{data_field, merge_form, print_json, report, today};
use anyhow::{Context, Result};
use tenantdesk_application::{FormMode, TenantsScreen};

pub async fn list(console: &Console, tenant: Option<&str>) -> Result<()> {
    console.require_session()?;
    let mut screen = TenantsScreen::new(console.api()?.clone());
    screen.load_branches().await?;

    match tenant {
        Some(tenant_id) => print_json(&screen.branches_for(tenant_id)),
        None => print_json(screen.branches()),
    }
}

pub async fn get(console: &Console, id: &str) -> Result<()> {
    console.require_session()?;
    let branch = console.api()?.get_branch(id).await?;
    print_json(&branch)
}

/// Adds a branch under the tenant named by `TenantId`.
pub async fn add(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let tenant_id = data_field(data, "TenantId")?.context("--data must include \"TenantId\"")?;
    let mut screen = TenantsScreen::new(console.api()?.clone());
    let form = merge_form(&screen.new_branch_form(&tenant_id, today()), data)?;
    screen.save_branch(&form, FormMode::Add).await?;
    report(&screen.banners);
    Ok(())
}

/// Edits the branch named by `Id`, starting from its current values.
pub async fn update(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let id = data_field(data, "Id")?.context("--data must include \"Id\"")?;
    let branch = console.api()?.get_branch(&id).await?;
    let tenant_id = data_field(data, "TenantId")?.unwrap_or_default();

    let mut screen = TenantsScreen::new(console.api()?.clone());
    let form = merge_form(&screen.edit_branch_form(&branch, &tenant_id, today()), data)?;
    screen.save_branch(&form, FormMode::Edit).await?;
    report(&screen.banners);
    Ok(())
}
