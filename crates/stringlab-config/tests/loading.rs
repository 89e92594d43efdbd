use std::{collections::HashMap, io::Write};

use stringlab_config::*;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_sources() {
    let config = ConfigManager::new()
        .with_env(HashMap::new())
        .load_config(&ConfigOverrides::default())
        .unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_file_values_are_applied() {
    let file = config_file("host = \"127.0.0.1\"\nport = 9001\nlog_level = \"debug\"\n");
    let config = ConfigManager::with_path(file.path().to_path_buf())
        .with_env(HashMap::new())
        .load_config(&ConfigOverrides::default())
        .unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9001);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.slow_request_ms, 100);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = ConfigManager::with_path("/nonexistent/stringlab.toml".into())
        .with_env(HashMap::new())
        .load_config(&ConfigOverrides::default());
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_prefixed_env_overrides_file() {
    let file = config_file("port = 9001\n");
    let config = ConfigManager::with_path(file.path().to_path_buf())
        .with_env(env(&[
            ("STRINGLAB_PORT", "9100"),
            ("STRINGLAB_SLOW_REQUEST_MS", "250"),
        ]))
        .load_config(&ConfigOverrides::default())
        .unwrap();
    assert_eq!(config.port, 9100);
    assert_eq!(config.slow_request_ms, 250);
}

#[test]
fn test_bare_port_beats_prefixed_env_and_cli_beats_both() {
    let manager =
        ConfigManager::new().with_env(env(&[("STRINGLAB_PORT", "9100"), ("PORT", "3000")]));

    let config = manager.load_config(&ConfigOverrides::default()).unwrap();
    assert_eq!(config.port, 3000);

    let config = manager
        .load_config(&ConfigOverrides {
            port: Some(4000),
            host: Some("localhost".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(config.port, 4000);
    assert_eq!(config.host, "localhost");
}

#[test]
fn test_invalid_values_are_rejected() {
    let result = ConfigManager::new()
        .with_env(env(&[("PORT", "not-a-port")]))
        .load_config(&ConfigOverrides::default());
    assert!(matches!(result, Err(ConfigError::Load(_))));

    let result = ConfigManager::new()
        .with_env(HashMap::new())
        .load_config(&ConfigOverrides {
            log_level: Some("chatty".into()),
            ..Default::default()
        });
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
