use anyhow::Result;
use config::Config;
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;
use url::Url;

use crate::error::{CoreError, CoreResult};

/// Prefix of every environment variable read by [`Settings::load`].
pub const ENV_PREFIX: &str = "CALENDAR";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the listen address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connection_max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// ## Summary
    /// Builds the `postgres://` connection URL for this database, with the
    /// user and password percent-encoded.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if host, port and name do not form a
    /// valid URL.
    pub fn url(&self) -> CoreResult<String> {
        let mut url = Url::parse(&format!(
            "postgres://{}:{}/{}",
            self.host, self.port, self.name
        ))
        .map_err(|e| CoreError::ConfigError(format!("invalid database url: {e}")))?;
        url.set_username(&self.user)
            .and_then(|()| url.set_password(Some(&self.password)))
            .map_err(|()| {
                CoreError::ConfigError("database url does not accept credentials".to_string())
            })?;
        url.query_pairs_mut().append_pair("sslmode", &self.ssl_mode);

        Ok(url.into())
    }

    /// ## Summary
    /// Returns the maximum lifetime of a pooled connection, `None` when disabled.
    #[must_use]
    pub fn connection_max_lifetime(&self) -> Option<std::time::Duration> {
        (self.connection_max_lifetime_secs > 0)
            .then(|| std::time::Duration::from_secs(self.connection_max_lifetime_secs))
    }
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_idle", &self.min_idle)
            .field(
                "connection_max_lifetime_secs",
                &self.connection_max_lifetime_secs,
            )
            .finish()
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// `CALENDAR__*` environment variables, in increasing order of precedence.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if building the configuration or
    /// deserializing it fails.
    pub fn load() -> CoreResult<Self> {
        Self::build(
            Self::builder()?
                .add_source(config::File::with_name("config.toml").required(false))
                .add_source(
                    config::Environment::with_prefix(ENV_PREFIX)
                        .separator("__")
                        .ignore_empty(true)
                        .try_parsing(true),
                ),
        )
    }

    /// ## Summary
    /// Returns the settings built from defaults only.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the defaults fail to deserialize.
    pub fn defaults() -> CoreResult<Self> {
        Self::build(Self::builder()?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> CoreResult<Self> {
        Ok(builder.build()?.try_deserialize::<Settings>()?)
    }

    fn builder() -> CoreResult<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("service.name", "calendar")?
            .set_default("service.env", "dev")?
            .set_default("logging.level", "debug")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.name", "calendar_development")?
            .set_default("database.user", "user")?
            .set_default("database.password", "password")?
            .set_default("database.ssl_mode", "disable")?
            .set_default("database.max_connections", 25)?
            .set_default("database.min_idle", 25)?
            .set_default("database.connection_max_lifetime_secs", 5)?)
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Ok(Settings::load()?)
}
