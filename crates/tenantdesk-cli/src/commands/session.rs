use super::console::Console;
use super::print_json;
use anyhow::{Result, bail};
use serde::Serialize;
use tenantdesk_application::LoginResult;
use tenantdesk_core::session::RestoreOutcome;

pub async fn login(
    console: &Console,
    phone: Option<String>,
    password: &str,
    remember: bool,
) -> Result<()> {
    let auth = console.auth()?;
    let phone = match phone.filter(|p| !p.trim().is_empty()) {
        Some(phone) => phone,
        None => match auth.remembered_phone()? {
            Some(phone) => phone,
            None => bail!("No remembered phone number, pass --phone"),
        },
    };

    // The preference follows every submitted login, accepted or not.
    auth.remember(&phone, remember)?;

    match auth.login(&phone, password).await? {
        LoginResult::SignedIn => {
            println!("Signed in as {}", phone);
            Ok(())
        }
        LoginResult::Rejected => bail!("Invalid phone number or password"),
    }
}

pub fn logout(console: &Console) -> Result<()> {
    console.session().clear_session()?;
    println!("Signed out");
    Ok(())
}

#[derive(Serialize)]
struct Status {
    profile: String,
    signed_in: bool,
    expired: bool,
    expires_at: Option<String>,
    tenant_id: Option<String>,
    company_id: Option<String>,
    branch_id: Option<String>,
}

pub fn status(console: &Console) -> Result<()> {
    let session = console.session();
    let outcome = session.restore()?;
    let snapshot = session.snapshot();

    print_json(&Status {
        profile: session.profile().to_string(),
        signed_in: outcome == RestoreOutcome::Restored,
        expired: outcome == RestoreOutcome::Expired,
        expires_at: snapshot.expires_at().map(|at| at.to_rfc3339()),
        tenant_id: snapshot.tenant_id().map(str::to_string),
        company_id: snapshot.company_id().map(str::to_string),
        branch_id: snapshot.branch_id().map(str::to_string),
    })
}
