use lw_domain::config::{Config, ConfigSeverity};

#[test]
fn default_base_url_is_localhost() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "http://localhost:3000");
}

#[test]
fn default_timeout_is_disabled() {
    let config = Config::default();
    assert_eq!(config.api.timeout_ms, 0);
}

#[test]
fn default_keychain_coordinates() {
    let config = Config::default();
    assert_eq!(config.credentials.service, "leadwire");
    assert_eq!(config.credentials.account, "session-token");
}

#[test]
fn explicit_base_url_parses() {
    let toml_str = r#"
[api]
base_url = "https://crm.example.com"
timeout_ms = 15000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.api.base_url, "https://crm.example.com");
    assert_eq!(config.api.timeout_ms, 15000);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let toml_str = r#"
[credentials]
account = "staging-token"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.credentials.service, "leadwire");
    assert_eq!(config.credentials.account, "staging-token");
    assert_eq!(config.api.base_url, "http://localhost:3000");
}

#[test]
fn default_config_validates_clean() {
    let config = Config::default();
    assert!(config.validate().is_empty());
}

#[test]
fn invalid_base_url_is_an_error() {
    let mut config = Config::default();
    config.api.base_url = "not a url".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "api.base_url"));
}

#[test]
fn non_http_scheme_is_an_error() {
    let mut config = Config::default();
    config.api.base_url = "ftp://crm.example.com".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "api.base_url"));
}

#[test]
fn plain_http_to_remote_host_warns() {
    let mut config = Config::default();
    config.api.base_url = "http://crm.example.com".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Warning && i.field == "api.base_url"));
}

#[test]
fn empty_credentials_are_errors() {
    let mut config = Config::default();
    config.credentials.service = String::new();
    config.credentials.account = String::new();
    let errors = config
        .validate()
        .into_iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    assert_eq!(errors, 2);
}
