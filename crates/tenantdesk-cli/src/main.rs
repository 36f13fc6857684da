use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tenantdesk_core::config::ConsoleConfig;
use tenantdesk_infrastructure::ConfigService;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::console::Console;

#[derive(Parser)]
#[command(name = "tenantdesk")]
#[command(version, about = "tenantdesk - admin console for tenants, branches, agents and users", long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Phone number; defaults to the remembered one
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: String,
        /// Remember the phone number for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Status,
    /// Manage tenants
    Tenants {
        #[command(subcommand)]
        action: TenantsAction,
    },
    /// Manage tenant branches
    Branches {
        #[command(subcommand)]
        action: BranchesAction,
    },
    /// Manage agents
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },
    /// Manage login accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

/// Search and sort options shared by the list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text to filter by
    #[arg(long)]
    search: Option<String>,
    /// Column to sort by
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,
    /// Sort descending
    #[arg(long)]
    desc: bool,
}

/// A JSON object of form fields, e.g. `{"TenantName": "Acme"}`.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    #[arg(long, value_name = "JSON")]
    data: String,
}

#[derive(Subcommand)]
enum TenantsAction {
    /// List tenants
    List {
        #[command(flatten)]
        list: ListArgs,
        /// List deleted tenants instead
        #[arg(long)]
        deleted: bool,
    },
    Add(DataArgs),
    Update(DataArgs),
    Delete { id: String },
}

#[derive(Subcommand)]
enum BranchesAction {
    /// List branches, optionally of one tenant
    List {
        #[arg(long, value_name = "ID")]
        tenant: Option<String>,
    },
    Get { id: String },
    Add(DataArgs),
    Update(DataArgs),
}

#[derive(Subcommand)]
enum AgentsAction {
    List(ListArgs),
    Get { id: String },
    Add(DataArgs),
    Update(DataArgs),
}

#[derive(Subcommand)]
enum UsersAction {
    List(ListArgs),
    Register(DataArgs),
}

fn init_tracing(config: &ConsoleConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new()?,
    };
    let config = service.get_config()?;
    init_tracing(&config);

    let console = Console::open(&config)?;

    match cli.command {
        Commands::Login {
            phone,
            password,
            remember,
        } => commands::session::login(&console, phone, &password, remember).await?,
        Commands::Logout => commands::session::logout(&console)?,
        Commands::Status => commands::session::status(&console)?,
        Commands::Tenants { action } => match action {
            TenantsAction::List { list, deleted } => {
                commands::tenants::list(&console, &list, deleted).await?
            }
            TenantsAction::Add(data) => commands::tenants::add(&console, &data.data).await?,
            TenantsAction::Update(data) => commands::tenants::update(&console, &data.data).await?,
            TenantsAction::Delete { id } => commands::tenants::delete(&console, &id).await?,
        },
        Commands::Branches { action } => match action {
            BranchesAction::List { tenant } => {
                commands::branches::list(&console, tenant.as_deref()).await?
            }
            BranchesAction::Get { id } => commands::branches::get(&console, &id).await?,
            BranchesAction::Add(data) => commands::branches::add(&console, &data.data).await?,
            BranchesAction::Update(data) => {
                commands::branches::update(&console, &data.data).await?
            }
        },
        Commands::Agents { action } => match action {
            AgentsAction::List(list) => commands::agents::list(&console, &list).await?,
            AgentsAction::Get { id } => commands::agents::get(&console, &id).await?,
            AgentsAction::Add(data) => commands::agents::add(&console, &data.data).await?,
            AgentsAction::Update(data) => commands::agents::update(&console, &data.data).await?,
        },
        Commands::Users { action } => match action {
            UsersAction::List(list) => commands::users::list(&console, &list).await?,
            UsersAction::Register(data) => commands::users::register(&console, &data.data).await?,
        },
    }

    Ok(())
}
