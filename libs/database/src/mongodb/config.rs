#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use std::fmt;

/// MongoDB database configuration
///
/// Credentials are kept apart from the host so they never appear in the
/// connection string or in logs. The connector attaches them as a
/// `Credential` on the client options.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Manual construction
/// let config = MongoConfig::new("localhost:27017", "user", "secret");
///
/// // Atlas cluster with a specific database
/// let config = MongoConfig::new("cluster0.example.mongodb.net", "user", "secret")
///     .with_scheme("mongodb+srv")
///     .with_database("products");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    /// Connection scheme: `mongodb` or `mongodb+srv`
    pub scheme: String,

    /// Host list, e.g. `localhost:27017` or `cluster0.example.mongodb.net`
    pub host: String,

    /// Storage user
    pub user: String,

    /// Storage password
    pub password: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            scheme: "mongodb".to_string(),
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: "products".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Connection string without credentials
    pub fn url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("url", &self.url())
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .field("min_pool_size", &self.min_pool_size)
            .finish()
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGO_ATLAS_USER` (required) - storage user
/// - `MONGO_ATLAS_PASSWORD` (required) - storage password
/// - `MONGO_HOST` (optional, default: `localhost:27017`)
/// - `MONGO_SCHEME` (optional, default: `mongodb`) - `mongodb` or `mongodb+srv`
/// - `MONGO_DATABASE` (optional, default: `products`)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let user = env_required("MONGO_ATLAS_USER")?;
        let password = env_required("MONGO_ATLAS_PASSWORD")?;
        let host = env_or_default("MONGO_HOST", "localhost:27017");
        let database = env_or_default("MONGO_DATABASE", "products");

        let scheme = env_or_default("MONGO_SCHEME", "mongodb");
        if scheme != "mongodb" && scheme != "mongodb+srv" {
            return Err(ConfigError::ParseError {
                key: "MONGO_SCHEME".to_string(),
                details: format!("expected 'mongodb' or 'mongodb+srv', got '{}'", scheme),
            });
        }

        Ok(Self::new(host, user, password)
            .with_scheme(scheme)
            .with_database(database))
    }
}
