use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/filmdex.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Fixed credential set for login and the toggle route.
///
/// Plaintext values live only in configuration; they are hashed once at
/// startup and dropped. No users table exists, the set is in-process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub users: Vec<CredentialConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Rolling window for counting requests per client.
    pub window_seconds: u64,

    /// Max requests per client inside one window before 429s.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_seconds: 15 * 60,
            max_requests: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // .env entries become process env vars before the override pass
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("filmdex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".filmdex").join("config.toml"));
        }

        paths
    }

    /// Deployment-provided settings win over the config file: database url,
    /// port, credentials and rate-limit policy all come from the environment
    /// in production.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FILMDEX_DATABASE_URL") {
            self.general.database_url = url;
        }

        if let Ok(port) = std::env::var("FILMDEX_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }

        if let Ok(level) = std::env::var("FILMDEX_LOG_LEVEL") {
            self.general.log_level = level;
        }

        if let Ok(users) = std::env::var("FILMDEX_USERS") {
            self.auth.users = parse_user_list(&users);
        }

        if let Ok(max) = std::env::var("FILMDEX_RATE_LIMIT_MAX")
            && let Ok(max) = max.parse()
        {
            self.rate_limit.max_requests = max;
        }

        if let Ok(window) = std::env::var("FILMDEX_RATE_LIMIT_WINDOW_SECS")
            && let Ok(window) = window.parse()
        {
            self.rate_limit.window_seconds = window;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.rate_limit.enabled && self.rate_limit.window_seconds == 0 {
            anyhow::bail!("Rate limit window must be > 0 when rate limiting is enabled");
        }

        for user in &self.auth.users {
            if user.username.is_empty() || user.password.is_empty() {
                anyhow::bail!("Credential entries must have a username and a password");
            }
        }

        Ok(())
    }
}

/// Parse a `user:pass,user:pass` environment value into credential entries.
/// Passwords may contain colons; only the first one splits.
fn parse_user_list(raw: &str) -> Vec<CredentialConfig> {
    raw.split(',')
        .filter_map(|entry| {
            let (username, password) = entry.trim().split_once(':')?;
            if username.is_empty() || password.is_empty() {
                return None;
            }
            Some(CredentialConfig {
                username: username.to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window_seconds, 900);
        assert!(config.auth.users.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [rate_limit]
            max_requests = 10

            [[auth.users]]
            username = "dan"
            password = "hunter2"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.auth.users.len(), 1);
        assert_eq!(config.auth.users[0].username, "dan");

        assert_eq!(config.general.database_url, "sqlite:data/filmdex.db");
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let mut config = Config::default();
        config.auth.users.push(CredentialConfig {
            username: "dan".to_string(),
            password: String::new(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_user_list() {
        let users = parse_user_list("dan:hunter2, eve:pa:ss");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "dan");
        assert_eq!(users[0].password, "hunter2");
        assert_eq!(users[1].password, "pa:ss");

        assert!(parse_user_list("nopassword").is_empty());
        assert!(parse_user_list(":missinguser").is_empty());
    }
}
