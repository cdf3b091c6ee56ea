//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (WCIF_GATE_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "wcif-gate.toml",
    ".wcif-gate.toml",
    "~/.config/wcif-gate/config.toml",
    "/etc/wcif-gate/config.toml",
];

/// Scope names are lowercase identifiers
const SCOPE_NAME_PATTERN: &str = r"^[a-z][a-z0-9_]*$";

/// Load configuration from a TOML string (useful for testing)
///
/// The seed file, if configured, is not required to exist.
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config_relaxed(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // e.g., WCIF_GATE_SERVER__PORT, WCIF_GATE_STORE__SEED_PATH
    // Double underscore (__) maps to nested keys (server.port)
    builder = builder.add_source(
        Environment::with_prefix("WCIF_GATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values, without touching the filesystem
fn validate_config_relaxed(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid {
            message: "server.port must be greater than 0".to_string(),
        });
    }

    validate_access_control(config)?;
    validate_credentials(config)?;

    Ok(())
}

/// Validate configuration values, including referenced files
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_config_relaxed(config)?;

    if let Some(seed) = &config.store.seed_path {
        let expanded = shellexpand::tilde(seed);
        if !Path::new(expanded.as_ref()).exists() {
            return Err(ConfigError::Invalid {
                message: format!("store.seed_path does not exist: {}", seed),
            });
        }
    }

    Ok(())
}

fn validate_access_control(config: &AppConfig) -> Result<(), ConfigError> {
    let ac = &config.access_control;

    if ac.managing_roles.is_empty() {
        return Err(ConfigError::Missing {
            field: "access_control.managing_roles".to_string(),
        });
    }

    validate_scope_name(&ac.manage_scope, "access_control.manage_scope")
}

/// Check that every session and token points at a declared user
fn validate_credentials(config: &AppConfig) -> Result<(), ConfigError> {
    let auth = &config.auth;

    let mut user_ids = HashSet::new();
    for user in &auth.users {
        if !user_ids.insert(user.id) {
            return Err(ConfigError::Invalid {
                message: format!("auth.users: duplicate user id {}", user.id),
            });
        }
    }

    let mut session_ids = HashSet::new();
    for (i, session) in auth.sessions.iter().enumerate() {
        if session.id.is_empty() || session.csrf_token.is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("auth.sessions[{}]: id and csrf_token must not be empty", i),
            });
        }
        if !user_ids.contains(&session.user_id) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "auth.sessions[{}]: unknown user id {}",
                    i, session.user_id
                ),
            });
        }
        if !session_ids.insert(session.id.expose_secret()) {
            return Err(ConfigError::Invalid {
                message: format!("auth.sessions[{}]: duplicate session id", i),
            });
        }
    }

    let mut tokens = HashSet::new();
    for (i, token) in auth.tokens.iter().enumerate() {
        if token.token.is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("auth.tokens[{}]: token must not be empty", i),
            });
        }
        if !user_ids.contains(&token.user_id) {
            return Err(ConfigError::Invalid {
                message: format!("auth.tokens[{}]: unknown user id {}", i, token.user_id),
            });
        }
        if !tokens.insert(token.token.expose_secret()) {
            return Err(ConfigError::Invalid {
                message: format!("auth.tokens[{}]: duplicate token", i),
            });
        }
        for scope in &token.scopes {
            validate_scope_name(scope, &format!("auth.tokens[{}].scopes", i))?;
        }
    }

    Ok(())
}

fn validate_scope_name(scope: &str, field_path: &str) -> Result<(), ConfigError> {
    let pattern = Regex::new(SCOPE_NAME_PATTERN).map_err(|e| ConfigError::Invalid {
        message: e.to_string(),
    })?;
    if !pattern.is_match(scope) {
        return Err(ConfigError::Invalid {
            message: format!("{}: invalid scope name '{}'", field_path, scope),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
[server]
port = 8080

[[auth.users]]
id = 1
name = "Delegate One"

[[auth.users]]
id = 2
name = "Admin"
roles = ["admin"]
"#;

    #[test]
    fn test_load_config_from_str_basic() {
        let config = load_config_from_str(BASE).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.users.len(), 2);
        assert_eq!(config.auth.users[1].roles.len(), 1);
    }

    #[test]
    fn test_session_for_unknown_user() {
        let toml = format!(
            "{}\n[[auth.sessions]]\nid = \"s1\"\nuser_id = 9\ncsrf_token = \"c1\"\n",
            BASE
        );
        let result = load_config_from_str(&toml);
        assert!(matches!(result, Err(ConfigError::Invalid { message }) if message.contains("unknown user id 9")));
    }

    #[test]
    fn test_duplicate_token() {
        let toml = format!(
            "{}\n[[auth.tokens]]\ntoken = \"t\"\nuser_id = 1\n\n[[auth.tokens]]\ntoken = \"t\"\nuser_id = 2\n",
            BASE
        );
        assert!(load_config_from_str(&toml).is_err());
    }

    #[test]
    fn test_invalid_scope_name() {
        let toml = format!(
            "{}\n[[auth.tokens]]\ntoken = \"t\"\nuser_id = 1\nscopes = [\"Manage Competitions\"]\n",
            BASE
        );
        assert!(load_config_from_str(&toml).is_err());
    }

    #[test]
    fn test_duplicate_user_id() {
        let toml = r#"
[[auth.users]]
id = 1
name = "a"

[[auth.users]]
id = 1
name = "b"
"#;
        assert!(load_config_from_str(toml).is_err());
    }

    #[test]
    fn test_empty_managing_roles() {
        let toml = r#"
[access_control]
managing_roles = []
"#;
        assert!(matches!(
            load_config_from_str(toml),
            Err(ConfigError::Missing { .. })
        ));
    }

    #[test]
    fn test_missing_seed_file_only_fails_strict_validation() {
        let mut config = load_config_from_str(BASE).unwrap();
        config.store.seed_path = Some("/nonexistent/competitions.json".to_string());
        assert!(validate_config_relaxed(&config).is_ok());
        assert!(validate_config(&config).is_err());
    }
}
