//! Configuration types for wcif-gate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::access_control::{GlobalRole, MANAGE_COMPETITIONS_SCOPE};
use crate::competition::{OwnerRole, UserId};
use crate::util::SecretString;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Ownership and scope rules
    pub access_control: AccessControlConfig,

    /// Known users and their credentials
    pub auth: AuthConfig,

    /// Competition store settings
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Preferred bind port
    pub port: u16,

    /// CORS policy
    pub cors: CorsMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 20290,
            cors: CorsMode::default(),
        }
    }
}

/// CORS policy for the API router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorsMode {
    /// No CORS headers (same-origin only)
    #[default]
    Disabled,
    /// Allow any origin, method and header
    Permissive,
}

/// Access control configuration
///
/// A user owns a competition when they hold one of `managing_roles` on it or
/// one of `global_manager_roles` site-wide. Token callers additionally need
/// `manage_scope`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    pub managing_roles: Vec<OwnerRole>,
    pub global_manager_roles: Vec<GlobalRole>,
    pub manage_scope: String,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            managing_roles: vec![
                OwnerRole::Delegate,
                OwnerRole::TraineeDelegate,
                OwnerRole::Organizer,
            ],
            global_manager_roles: vec![GlobalRole::Admin, GlobalRole::ResultsTeam],
            manage_scope: MANAGE_COMPETITIONS_SCOPE.to_string(),
        }
    }
}

/// Users and the credentials that authenticate them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub users: Vec<UserConfig>,
    pub sessions: Vec<SessionConfig>,
    pub tokens: Vec<TokenConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<GlobalRole>,
}

/// An established interactive session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Value of the `session` cookie
    pub id: SecretString,
    pub user_id: UserId,
    /// Expected `X-CSRF-Token` for unsafe requests
    pub csrf_token: SecretString,
}

/// An issued OAuth access token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub token: SecretString,
    pub user_id: UserId,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Competition store configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file with competitions to load at startup
    pub seed_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
