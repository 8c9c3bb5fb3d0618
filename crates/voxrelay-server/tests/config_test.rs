use std::collections::HashMap;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};
use voxrelay_server::config::{apply_env_overrides, Config, ConfigError};

fn parse(contents: &str) -> Config {
    toml::from_str(contents).unwrap()
}

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_documented_fallbacks() {
    let config = Config::default();
    assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.server.port, 3001);
    assert!(config.retell.api_key.is_empty());
    assert_eq!(config.retell.default_agent_id, None);
    assert_eq!(config.retell.timeout_secs, 10);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn file_sections_are_parsed() {
    let config = parse(
        r#"
        [server]
        host = "127.0.0.1"
        port = 8080

        [retell]
        api_key = "key_file"
        default_agent_id = "agent_file"
        timeout_secs = 5

        [logging]
        level = "debug"
        json = true
        "#,
    );

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.retell.api_key, "key_file");
    assert_eq!(config.retell.default_agent_id.as_deref(), Some("agent_file"));
    assert_eq!(config.retell.timeout_secs, 5);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn retell_api_key_wins_over_api_key() {
    let mut config = Config::default();
    apply_env_overrides(
        &mut config,
        lookup(&[("RETELL_API_KEY", "key_retell"), ("API_KEY", "key_generic")]),
    );
    assert_eq!(config.retell.api_key, "key_retell");

    let mut config = Config::default();
    apply_env_overrides(&mut config, lookup(&[("API_KEY", "key_generic")]));
    assert_eq!(config.retell.api_key, "key_generic");
}

#[test]
fn env_overrides_port_agent_and_logging() {
    let mut config = Config::default();
    apply_env_overrides(
        &mut config,
        lookup(&[
            ("PORT", "4000"),
            ("AGENT_ID", "agent_env"),
            ("RETELL_BASE_URL", "http://localhost:9999"),
            ("VOXRELAY_LOG_LEVEL", "warn"),
            ("VOXRELAY_LOG_JSON", "1"),
        ]),
    );

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.retell.default_agent_id.as_deref(), Some("agent_env"));
    assert_eq!(config.retell.base_url, "http://localhost:9999");
    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.json);
}

#[test]
fn invalid_and_empty_env_values_are_ignored() {
    let mut config = Config::default();
    apply_env_overrides(
        &mut config,
        lookup(&[("PORT", "not-a-port"), ("VOXRELAY_HOST", "nope"), ("AGENT_ID", "")]),
    );

    assert_eq!(config.server.port, 3001);
    assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.retell.default_agent_id, None);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[server\nport = ").unwrap();

    let err = voxrelay_server::config::load_config(file.path().to_str()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
