use clap::Parser;
use tracing_subscriber::EnvFilter;

mod auth;
mod cli;
mod config;
mod fetch;

use cli::{AuthCommand, Cli, Command, ConfigCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_cli_tracing();

    let cli = Cli::parse();
    let (cfg, config_path) = cli::load_config()?;

    match cli.command {
        Command::Auth(AuthCommand::SetToken { token }) => auth::set_token(&cfg, token),
        Command::Auth(AuthCommand::Status) => auth::status(&cfg),
        Command::Auth(AuthCommand::Clear) => auth::clear(&cfg),
        Command::Config(ConfigCommand::Validate) => {
            if !config::validate(&cfg, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            config::show(&cfg);
            Ok(())
        }
        Command::Leads(args) => fetch::leads(&cfg, args).await,
        Command::Statuses => fetch::statuses(&cfg).await,
        Command::Sources => fetch::sources(&cfg).await,
        Command::Tags(args) => fetch::tags(&cfg, args).await,
        Command::Agents { user } => fetch::agents(&cfg, user).await,
        Command::Campaigns { page } => fetch::campaigns(&cfg, page).await,
        Command::CampaignLeads { name, page } => fetch::campaign_leads(&cfg, name, page).await,
    }
}

/// Initialize compact stderr-only tracing.
///
/// Defaults to `warn` level so diagnostic output does not pollute stdout;
/// raise it with `RUST_LOG` when chasing a request.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
