use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Backend connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the CRM backend. Also the source of the `referer` and
    /// `origin` request headers.
    #[serde(default = "d_base_url")]
    pub base_url: String,
    /// Client-wide transport timeout in milliseconds. `0` disables the
    /// timeout entirely; the campaign-list fetch carries its own fixed
    /// deadline regardless of this setting.
    #[serde(default)]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            timeout_ms: 0,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Credential storage
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where the session token lives in the OS keychain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default = "d_service")]
    pub service: String,
    #[serde(default = "d_account")]
    pub account: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service: d_service(),
            account: d_account(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "http://localhost:3000".into()
}
fn d_service() -> String {
    "leadwire".into()
}
fn d_account() -> String {
    "session-token".into()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.api.base_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Error,
                        field: "api.base_url".into(),
                        message: format!("unsupported scheme \"{}\"", parsed.scheme()),
                    });
                } else if parsed.scheme() == "http" && parsed.host_str() != Some("localhost")
                    && parsed.host_str() != Some("127.0.0.1")
                {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Warning,
                        field: "api.base_url".into(),
                        message: "plain http to a non-local host sends the session cookie in the clear".into(),
                    });
                }
            }
            Err(e) => {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "api.base_url".into(),
                    message: format!("not a valid URL: {e}"),
                });
            }
        }

        if self.credentials.service.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "credentials.service".into(),
                message: "service must not be empty".into(),
            });
        }
        if self.credentials.account.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "credentials.account".into(),
                message: "account must not be empty".into(),
            });
        }

        errors
    }
}
