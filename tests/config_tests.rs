//! Configuration loading tests

use wcif_gate::access_control::GlobalRole;
use wcif_gate::competition::{OwnerRole, UserId};
use wcif_gate::config::{CorsMode, LogFormat, load_config_from_str};
use wcif_gate::error::ConfigError;

const FULL_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 9000
cors = "permissive"

[access_control]
managing_roles = ["delegate", "organizer"]
global_manager_roles = ["admin"]
manage_scope = "manage_competitions"

[[auth.users]]
id = 1
name = "Delegate One"

[[auth.users]]
id = 2
name = "Admin"
roles = ["admin"]

[[auth.sessions]]
id = "session-1"
user_id = 1
csrf_token = "csrf-1"

[[auth.tokens]]
token = "token-2"
user_id = 2
scopes = ["public", "manage_competitions"]

[store]
seed_path = "/does/not/matter/for/str/loading.json"

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn test_empty_config_uses_defaults() {
    let config = load_config_from_str("").unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 20290);
    assert_eq!(config.server.cors, CorsMode::Disabled);
    assert_eq!(config.access_control.manage_scope, "manage_competitions");
    assert_eq!(
        config.access_control.managing_roles,
        vec![OwnerRole::Delegate, OwnerRole::TraineeDelegate, OwnerRole::Organizer]
    );
    assert_eq!(
        config.access_control.global_manager_roles,
        vec![GlobalRole::Admin, GlobalRole::ResultsTeam]
    );
    assert!(config.auth.users.is_empty());
    assert!(config.store.seed_path.is_none());
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.cors, CorsMode::Permissive);
    assert_eq!(config.access_control.managing_roles.len(), 2);
    assert_eq!(config.auth.users[1].roles, vec![GlobalRole::Admin]);
    assert_eq!(config.auth.sessions[0].user_id, UserId(1));
    assert_eq!(config.auth.tokens[0].scopes.len(), 2);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_secrets_are_redacted_in_debug_output() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();
    let debug = format!("{:?}", config.auth);

    assert!(!debug.contains("session-1"));
    assert!(!debug.contains("token-2"));
    assert!(!debug.contains("csrf-1"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn test_session_for_unknown_user() {
    let config_str = r#"
[[auth.users]]
id = 1
name = "One"

[[auth.sessions]]
id = "s"
user_id = 7
csrf_token = "c"
"#;
    assert!(matches!(
        load_config_from_str(config_str),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_duplicate_token_secret() {
    let config_str = r#"
[[auth.users]]
id = 1
name = "One"

[[auth.tokens]]
token = "same"
user_id = 1
scopes = []

[[auth.tokens]]
token = "same"
user_id = 1
scopes = ["public"]
"#;
    assert!(load_config_from_str(config_str).is_err());
}

#[test]
fn test_invalid_manage_scope() {
    let config_str = r#"
[access_control]
manage_scope = "Manage Competitions"
"#;
    assert!(load_config_from_str(config_str).is_err());
}

#[test]
fn test_empty_managing_roles() {
    let config_str = r#"
[access_control]
managing_roles = []
"#;
    assert!(matches!(
        load_config_from_str(config_str),
        Err(ConfigError::Missing { .. })
    ));
}

#[test]
fn test_unknown_role_rejected() {
    let config_str = r#"
[access_control]
managing_roles = ["competitor"]
"#;
    assert!(load_config_from_str(config_str).is_err());
}

#[test]
#[serial_test::serial]
fn test_explicit_path_must_exist() {
    use wcif_gate::config::load_config;

    let result = load_config(Some("/nonexistent/wcif-gate.toml"));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial_test::serial]
fn test_seed_path_must_exist_when_loading_from_file() {
    use std::fs;
    use wcif_gate::config::load_config;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("wcif-gate.toml");
    fs::write(&config_path, "[store]\nseed_path = \"/nonexistent/seed.json\"\n").unwrap();

    let result = load_config(Some(config_path.to_str().unwrap()));
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));

    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, "[]").unwrap();
    fs::write(
        &config_path,
        format!("[store]\nseed_path = {:?}\n", seed_path.to_str().unwrap()),
    )
    .unwrap();

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(config.store.seed_path.as_deref(), seed_path.to_str());
}

#[test]
#[serial_test::serial]
fn test_env_var_overrides_file() {
    use std::env;
    use std::fs;
    use wcif_gate::config::load_config;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("wcif-gate.toml");
    fs::write(&config_path, "[server]\nport = 9000\n\n[logging]\nlevel = \"warn\"\n").unwrap();

    unsafe {
        env::set_var("WCIF_GATE_SERVER__PORT", "9100");
        env::set_var("WCIF_GATE_LOGGING__LEVEL", "trace");
    }

    let config = load_config(Some(config_path.to_str().unwrap()));

    unsafe {
        env::remove_var("WCIF_GATE_SERVER__PORT");
        env::remove_var("WCIF_GATE_LOGGING__LEVEL");
    }

    let config = config.unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.logging.level, "trace");
}
