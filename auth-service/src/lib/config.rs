use std::env;
use std::fmt;
use std::time::Duration;

use auth::SigningConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret substituted in development when none is configured.
pub const DEVELOPMENT_SECRET: &str = "your_secret_key_here";

const DEVELOPMENT_MODE: &str = "development";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Value of `RUN_MODE` at load time
    #[serde(skip)]
    pub run_mode: String,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone, Default)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub refresh_secret: Option<String>,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_secret", &self.refresh_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_store_timeout_ms(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_store_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| DEVELOPMENT_MODE.to_string());

        // Example: JWT__SECRET=... overrides jwt.secret
        Self::load_with(run_mode, Environment::default().separator("__"))
    }

    fn load_with(run_mode: String, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let mut config: Config = configuration.try_deserialize()?;
        config.run_mode = run_mode;

        Ok(config)
    }

    /// Build the signing configuration shared by every token operation.
    ///
    /// Without `jwt.secret` a fixed development secret is used, but only in
    /// development mode; any other mode fails.
    ///
    /// # Errors
    /// * `MissingPrimarySecret` - No secret configured outside development
    pub fn signing_config(&self) -> Result<SigningConfig, auth::ConfigError> {
        let secret = match self.jwt.secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.to_string(),
            None if self.run_mode == DEVELOPMENT_MODE => {
                tracing::warn!(
                    run_mode = %self.run_mode,
                    "JWT__SECRET is not set; using the insecure development secret"
                );
                DEVELOPMENT_SECRET.to_string()
            }
            None => return Err(auth::ConfigError::MissingPrimarySecret),
        };

        SigningConfig::new(secret, self.jwt.refresh_secret.clone())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store.timeout_ms)
    }
}
