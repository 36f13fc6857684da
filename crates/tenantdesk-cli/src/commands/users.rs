use super::console::Console;
use super::{apply_list_args, merge_form, print_json, report};
use crate::ListArgs;
use anyhow::Result;
use tenantdesk_application::UsersScreen;

pub async fn list(console: &Console, args: &ListArgs) -> Result<()> {
    console.require_session()?;
    let mut screen = UsersScreen::new(console.api()?.clone());
    apply_list_args(&mut screen.query, args)?;
    screen.load().await?;
    print_json(&screen.visible_users())
}

/// Registers a login account. `AgentId` defaults to the primary agent.
pub async fn register(console: &Console, data: &str) -> Result<()> {
    console.require_session()?;
    let mut screen = UsersScreen::new(console.api()?.clone());
    screen.form = merge_form(&screen.form, data)?;
    screen.register().await?;
    report(&screen.banners);
    Ok(())
}
