//! `leadwire auth` — session token management against the OS keychain.

use anyhow::Context;
use chrono::{DateTime, Utc};

use lw_domain::config::Config;
use lw_session::{claims, validator, KeyringTokenStore, TokenStore};

/// Store a session token, prompting with hidden input when the flag is
/// omitted so the token never lands in shell history.
pub fn set_token(cfg: &Config, token: Option<String>) -> anyhow::Result<()> {
    let token = match token {
        Some(t) => t,
        None => rpassword::prompt_password_stdout("Session token: ").context("reading token")?,
    };
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("empty token");
    }

    // Decode up front so a truncated paste is caught before it is stored.
    let claims = claims::decode(token).context("token did not decode as a JWT")?;

    let store = KeyringTokenStore::new(&cfg.credentials);
    store.set(token)?;

    println!("Token stored (expires {}).", fmt_ts(claims.exp));
    Ok(())
}

/// Decode the stored token and report whether the session is usable.
///
/// Exits 0 for a valid session, 1 otherwise, so scripts can branch on it.
pub fn status(cfg: &Config) -> anyhow::Result<()> {
    let store = KeyringTokenStore::new(&cfg.credentials);
    let Some(token) = store.get()? else {
        println!("No session token stored.");
        std::process::exit(1);
    };

    match claims::decode(&token) {
        Ok(claims) => {
            println!("subject: {}", claims.sub.as_deref().unwrap_or("-"));
            if let Some(iat) = claims.iat {
                println!("issued:  {}", fmt_ts(iat));
            }
            println!("expires: {}", fmt_ts(claims.exp));
            if validator::is_expired(&claims, Utc::now().timestamp()) {
                println!("state:   EXPIRED");
                std::process::exit(1);
            }
            println!("state:   valid");
        }
        Err(e) => {
            println!("state:   MALFORMED ({e})");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Remove the stored token. Succeeds when there was nothing to remove.
pub fn clear(cfg: &Config) -> anyhow::Result<()> {
    let store = KeyringTokenStore::new(&cfg.credentials);
    store.delete()?;
    println!("Token cleared.");
    Ok(())
}

fn fmt_ts(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| format!("@{secs}"))
}
