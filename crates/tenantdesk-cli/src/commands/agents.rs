use super::console::Console;
use super::{apply_list_args, data_field, merge_form, print_json, report, today};
use crate::ListArgs;
use anyhow::{Context, Result};
use tenantdesk_application::{AgentsScreen, FormMode};

pub async fn list(console: &Console, args: &ListArgs) -> Result<()> {
    console.require_session()?;
    let mut screen = AgentsScreen::new(console.api()?.clone());
    apply_list_args(&mut screen.query, args)?;
    screen.load().await?;
    print_json(&screen.visible_agents())
}

pub async fn get(console: &Console, id: &str) -> Result<()> {
    console.require_session()?;
    let mut screen = AgentsScreen::new(console.api()?.clone());
    let agent = screen.get_agent(id).await?;
    print_json(&agent)
}

pub async fn add(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let mut screen = AgentsScreen::new(console.api()?.clone());
    let form = merge_form(&screen.new_form(today()), data)?;
    screen.save(&form, FormMode::Add).await?;
    report(&screen.banners);
    Ok(())
}

/// Edits the agent named by `Id`, starting from its current values.
pub async fn update(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let id = data_field(data, "Id")?.context("--data must include \"Id\"")?;
    let mut screen = AgentsScreen::new(console.api()?.clone());
    let agent = screen.get_agent(&id).await?;
    let form = merge_form(&screen.edit_form(&agent, today()), data)?;
    screen.save(&form, FormMode::Edit).await?;
    report(&screen.banners);
    Ok(())
}
