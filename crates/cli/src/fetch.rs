//! One-shot fetch commands. Each builds the REST client, performs a single
//! call on behalf of the given identity, and pretty-prints the JSON result
//! to stdout. Degraded picker fetches print an empty list; the reason goes
//! to stderr via tracing.

use std::sync::Arc;

use lw_domain::config::Config;
use lw_leads::types::ScopeOverrides;
use lw_leads::{LeadsProvider, RestLeadsClient};
use lw_session::KeyringTokenStore;

use crate::cli::{LeadsArgs, PageArgs, TagsArgs, UserArgs};

fn client(cfg: &Config) -> anyhow::Result<RestLeadsClient> {
    let store = Arc::new(KeyringTokenStore::new(&cfg.credentials));
    Ok(RestLeadsClient::new(cfg, store)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn leads(cfg: &Config, args: LeadsArgs) -> anyhow::Result<()> {
    let client = client(cfg)?;
    let user = args.user.to_user();
    let filters = args.to_filters();
    let page = client
        .leads(
            &user,
            &filters,
            &args.search,
            args.page.to_pagination(),
            &ScopeOverrides::default(),
        )
        .await?;
    print_json(&page)
}

pub async fn statuses(cfg: &Config) -> anyhow::Result<()> {
    let options = client(cfg)?.statuses().await;
    print_json(&options)
}

pub async fn sources(cfg: &Config) -> anyhow::Result<()> {
    let options = client(cfg)?.sources().await;
    print_json(&options)
}

pub async fn tags(cfg: &Config, args: TagsArgs) -> anyhow::Result<()> {
    let page = client(cfg)?
        .tags(args.page.to_pagination(), args.search.as_deref())
        .await;
    print_json(&page)
}

pub async fn agents(cfg: &Config, user: UserArgs) -> anyhow::Result<()> {
    let tree = client(cfg)?.agent_tree(&user.to_user()).await;
    print_json(&tree)
}

pub async fn campaigns(cfg: &Config, page: PageArgs) -> anyhow::Result<()> {
    let list = client(cfg)?.campaigns(page.to_pagination()).await?;
    print_json(&list)
}

pub async fn campaign_leads(cfg: &Config, name: String, page: PageArgs) -> anyhow::Result<()> {
    let leads = client(cfg)?
        .campaign_leads(&name, page.to_pagination())
        .await?;
    print_json(&leads)
}
