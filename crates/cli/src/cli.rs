use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use lw_domain::config::Config;
use lw_leads::types::{DateRange, FilterOptions, PaginationParams, Permissions, User};

/// leadwire — CLI for the Leadwire CRM leads module.
#[derive(Debug, Parser)]
#[command(name = "leadwire", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Session token management.
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Search leads visible to the given user.
    Leads(LeadsArgs),
    /// List status picker options.
    Statuses,
    /// List source picker options.
    Sources,
    /// List one page of tag options.
    Tags(TagsArgs),
    /// Print the agent picker tree for the given user.
    Agents {
        #[command(flatten)]
        user: UserArgs,
    },
    /// List campaigns with lead counts, most leads first.
    Campaigns {
        #[command(flatten)]
        page: PageArgs,
    },
    /// List the leads recorded for one campaign.
    CampaignLeads {
        /// Campaign name exactly as the backend stores it.
        name: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store a session token in the OS keychain.
    SetToken {
        /// The raw JWT. Prompted for (hidden) when omitted.
        #[arg(long)]
        token: Option<String>,
    },
    /// Decode the stored token and report whether the session is usable.
    Status,
    /// Remove the stored token from the OS keychain.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

/// Identity flags shared by the commands that query on a user's behalf.
#[derive(Debug, Args)]
pub struct UserArgs {
    /// Backend id of the signed-in user.
    #[arg(long)]
    pub user_id: String,
    /// Role string, e.g. "agent" or "superAdmin".
    #[arg(long, default_value = "agent")]
    pub role: String,
    /// Lead-module capability grant (repeatable), e.g. "view_all".
    #[arg(long = "cap", value_name = "CAPABILITY")]
    pub caps: Vec<String>,
}

impl UserArgs {
    pub fn to_user(&self) -> User {
        let mut permissions = Permissions::default();
        permissions.lead.extend(self.caps.iter().cloned());
        User {
            id: self.user_id.clone(),
            role: self.role.clone(),
            permissions,
        }
    }
}

/// Pagination flags. Pages are zero-based here; the client converts to the
/// backend's one-based numbering.
#[derive(Debug, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

impl PageArgs {
    pub fn to_pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

#[derive(Debug, Args)]
pub struct LeadsArgs {
    #[command(flatten)]
    pub user: UserArgs,
    /// Free-text search term.
    #[arg(long, default_value = "")]
    pub search: String,
    /// Field group the search term applies to (repeatable).
    #[arg(long = "search-in", value_name = "FIELD")]
    pub search_in: Vec<String>,
    /// Agent id to filter by (repeatable); "non-assigned" selects leads
    /// without an assignee.
    #[arg(long = "agent", value_name = "ID")]
    pub agents: Vec<String>,
    /// Status id to filter by (repeatable).
    #[arg(long = "status", value_name = "ID")]
    pub statuses: Vec<String>,
    /// Source id to filter by (repeatable).
    #[arg(long = "source", value_name = "ID")]
    pub sources: Vec<String>,
    /// Tag to filter by (repeatable).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Start of the date window (RFC 3339, e.g. 2024-05-01T00:00:00Z).
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,
    /// End of the date window (RFC 3339).
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,
    /// Timestamp field the window filters on (defaults to createdAt).
    #[arg(long)]
    pub date_for: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

impl LeadsArgs {
    pub fn to_filters(&self) -> FilterOptions {
        FilterOptions {
            search_box_filters: if self.search_in.is_empty() {
                None
            } else {
                Some(self.search_in.clone())
            },
            selected_agents: self.agents.clone(),
            selected_statuses: self.statuses.clone(),
            selected_sources: self.sources.clone(),
            selected_tags: self.tags.clone(),
            date_range: DateRange {
                from: self.from,
                to: self.to,
            },
            date_for: self.date_for.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Narrow tags by name.
    #[arg(long)]
    pub search: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `LW_CONFIG` (or
/// `leadwire.toml` by default). A missing file is not an error; defaults
/// apply. Returns the parsed [`Config`] and the path that was used.
pub fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path = std::env::var("LW_CONFIG").unwrap_or_else(|_| "leadwire.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        Config::default()
    };

    Ok((config, config_path))
}
