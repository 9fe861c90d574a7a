use std::env;
use std::fmt;
use std::path::Path;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

use crate::dotenv;

const ENV_FILE: &str = ".env";
const DEFAULT_HTTP_PORT: i64 = 5000;
const DEFAULT_ADMIN_ROLE: &str = "admin";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Credentials of the user registered at startup.
#[derive(Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: Option<i64>,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, ADMIN__USERNAME, etc.)
    /// 2. `.env` file in the working directory
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let env_file = match dotenv::load_file(Path::new(ENV_FILE)) {
            Ok(Some(env_file)) => {
                if let Some(error) = &env_file.error {
                    tracing::warn!(
                        file = ENV_FILE,
                        error = %error,
                        "Env file parsing stopped early"
                    );
                }
                Some(env_file)
            }
            Ok(None) => {
                tracing::debug!(file = ENV_FILE, "No env file found");
                None
            }
            Err(e) => return Err(ConfigError::Foreign(Box::new(e))),
        };
        let variables = merge_variables(env_file, env::vars());

        Self::from_sources(&run_mode, variables)
    }

    /// Build configuration from config files and an explicit variable set.
    ///
    /// # Arguments
    /// * `run_mode` - Selects `config/{run_mode}.toml`
    /// * `variables` - Environment-style variables, `__` separating sections
    ///
    /// # Errors
    /// * `ConfigError` - Sources are unreadable, values missing or invalid
    pub fn from_sources(
        run_mode: &str,
        variables: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", DEFAULT_HTTP_PORT)?
            .set_default("admin.role", DEFAULT_ADMIN_ROLE)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .source(Some(variables)),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configuration the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be empty".to_string(),
            ));
        }
        if self.admin.username.is_empty() || self.admin.password.is_empty() {
            return Err(ConfigError::Message(
                "admin.username and admin.password must not be empty".to_string(),
            ));
        }
        if matches!(self.jwt.expiration_hours, Some(hours) if hours <= 0) {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Combine `.env` entries with the process environment.
///
/// Process variables win; `.env` entries only fill in what is unset.
pub fn merge_variables(
    env_file: Option<dotenv::EnvFile>,
    process_vars: impl IntoIterator<Item = (String, String)>,
) -> Map<String, String> {
    let mut variables = Map::new();
    if let Some(env_file) = env_file {
        variables.extend(env_file.entries);
    }
    variables.extend(process_vars);
    variables
}

impl JwtConfig {
    /// Token lifetime, `None` when tokens never expire.
    pub fn token_lifetime(&self) -> Option<Duration> {
        self.expiration_hours.map(Duration::hours)
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}
