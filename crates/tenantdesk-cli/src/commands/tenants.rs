use super::console::Console;
use super::{apply_list_args, data_field, merge_form, print_json, report, today};
use crate::ListArgs;
use anyhow::{Context, Result};
use tenantdesk_application::{FormMode, TenantsScreen};

pub async fn list(console: &Console, args: &ListArgs, deleted: bool) -> Result<()> {
    console.require_session()?;
    let mut screen = TenantsScreen::new(console.api()?.clone());
    apply_list_args(&mut screen.query, args)?;

    if deleted {
        screen.load_deleted().await?;
        print_json(&screen.visible_deleted())
    } else {
        screen.load_tenants().await?;
        print_json(&screen.visible_tenants())
    }
}

pub async fn add(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let mut screen = TenantsScreen::new(console.api()?.clone());
    let form = merge_form(&screen.new_tenant_form(today()), data)?;
    screen.save_tenant(&form, FormMode::Add).await?;
    report(&screen.banners);
    Ok(())
}

/// Edits the tenant named by `Id`, starting from its current values.
pub async fn update(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let id = data_field(data, "Id")?.context("--data must include \"Id\"")?;
    let mut screen = TenantsScreen::new(console.api()?.clone());
    screen.load_tenants().await?;

    let tenant = screen
        .tenants()
        .iter()
        .find(|t| t.id == id)
        .with_context(|| format!("No tenant with id '{}'", id))?;
    let form = merge_form(&screen.edit_tenant_form(tenant, today()), data)?;
    screen.save_tenant(&form, FormMode::Edit).await?;
    report(&screen.banners);
    Ok(())
}

pub async fn delete(console: &Console, id: &str) -> Result<()> {
    console.require_session()?;
    let mut screen = TenantsScreen::new(console.api()?.clone());
    screen.delete_tenant(id).await?;
    report(&screen.banners);
    Ok(())
}
