//! Client configuration tests
//!
//! TOML parsing with defaults, validation, environment overrides through an
//! injected lookup, loading from a file and handing the log profile to the
//! logging facility.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::io::Write;

use tempfile::NamedTempFile;

use odoorpc_client::config::{ENV_BASE_URL, ENV_LOG_PROFILE};
use odoorpc_client::ClientConfig;
use odoorpc_core::logging_facility::Profile;
use odoorpc_core::RpcErrorKind;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_minimal_toml_gets_defaults() {
    let config = ClientConfig::from_toml_str(r#"base_url = "https://odoo.example.com""#).unwrap();
    assert_eq!(config, ClientConfig::new("https://odoo.example.com"));
    assert_eq!(config.search_read_path, "/web/dataset/search_read");
    assert_eq!(config.call_kw_path, "/web/dataset/call_kw");
    assert_eq!(config.message_model, "mail.message");
    assert_eq!(config.container_model, "mail.channel");
    assert_eq!(config.timeout().as_secs(), 30);
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_toml() {
    let config = ClientConfig::from_toml_str(
        r#"
        base_url = "https://odoo.example.com"
        search_read_path = "/web/dataset/search_read"
        call_kw_path = "/web/dataset/call_kw"
        message_model = "mail.message"
        container_model = "discuss.channel"
        timeout_secs = 5
        log_profile = "development"
        "#,
    )
    .unwrap();
    assert_eq!(config.container_model, "discuss.channel");
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.log_profile, Profile::Development);
    assert_eq!(config.domain_builder().container_model(), "discuss.channel");
}

#[test]
fn test_short_profile_names_in_toml() {
    for (name, profile) in [("dev", Profile::Development), ("prod", Profile::Production)] {
        let config = ClientConfig::from_toml_str(&format!(
            "base_url = \"https://odoo.example.com\"\nlog_profile = \"{}\"",
            name
        ))
        .unwrap();
        assert_eq!(config.log_profile, profile);
    }
}

#[test]
fn test_unknown_profile_in_toml_is_rejected() {
    let err = ClientConfig::from_toml_str(
        r#"
        base_url = "https://odoo.example.com"
        log_profile = "verbose"
        "#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), RpcErrorKind::Config);
    assert!(err.message().contains("verbose"));
}

#[test]
fn test_init_logging_from_config() {
    let mut config = ClientConfig::new("https://odoo.example.com");
    config.log_profile = Profile::Test;
    config.init_logging();
    config.init_logging();
    tracing::info!("logging initialised from config");
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = ClientConfig::from_toml_str(
        r#"
        base_url = "https://odoo.example.com"
        password = "admin"
        "#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), RpcErrorKind::Config);
}

#[test]
fn test_missing_base_url_is_rejected() {
    let err = ClientConfig::from_toml_str("timeout_secs = 5").unwrap_err();
    assert_eq!(err.code(), "ERR_CONFIG");
}

#[test]
fn test_validate_empty_base_url() {
    let err = ClientConfig::new("  ").validate().unwrap_err();
    assert_eq!(err.kind(), RpcErrorKind::Config);
    assert_eq!(err.field(), Some("base_url"));
}

#[test]
fn test_validate_relative_path() {
    let mut config = ClientConfig::new("https://odoo.example.com");
    config.call_kw_path = "web/dataset/call_kw".to_string();
    let err = config.validate().unwrap_err();
    assert_eq!(err.field(), Some("call_kw_path"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = ClientConfig::new("https://odoo.example.com");
    config.timeout_secs = 0;
    assert_eq!(config.validate().unwrap_err().field(), Some("timeout_secs"));
}

#[test]
fn test_overrides_replace_file_values() {
    let mut config = ClientConfig::new("https://odoo.example.com");
    config
        .apply_overrides(lookup(&[
            (ENV_BASE_URL, "https://staging.example.com"),
            (ENV_LOG_PROFILE, "test"),
        ]))
        .unwrap();
    assert_eq!(config.base_url, "https://staging.example.com");
    assert_eq!(config.log_profile, Profile::Test);
}

#[test]
fn test_no_overrides_keeps_values() {
    let mut config = ClientConfig::new("https://odoo.example.com");
    config.apply_overrides(lookup(&[])).unwrap();
    assert_eq!(config, ClientConfig::new("https://odoo.example.com"));
}

#[test]
fn test_unknown_profile_override_is_rejected() {
    let mut config = ClientConfig::new("https://odoo.example.com");
    let err = config
        .apply_overrides(lookup(&[(ENV_LOG_PROFILE, "verbose")]))
        .unwrap_err();
    assert_eq!(err.field(), Some("log_profile"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"base_url = "https://odoo.example.com""#).unwrap();
    writeln!(file, "timeout_secs = 12").unwrap();
    file.flush().unwrap();

    // ODOORPC_BASE_URL may be set in the environment running the tests
    let config = ClientConfig::load(file.path()).unwrap();
    assert_eq!(config.timeout_secs, 12);
    assert!(!config.base_url.is_empty());
}

#[test]
fn test_load_missing_file() {
    let err = ClientConfig::load(std::path::Path::new("/nonexistent/odoorpc.toml")).unwrap_err();
    assert_eq!(err.kind(), RpcErrorKind::Config);
    assert!(err.message().contains("unable to read config file"));
}
