use dotenvy::dotenv;
use serde::Deserialize;

use crate::error::Result;

fn default_max_connections() -> u32 {
    5
}

/// Configuration for the contact store
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Upper bound on pooled connections
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are loaded first if the file exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build configuration from explicit key/value pairs instead of the process environment
    pub fn from_iter<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        let config = envy::from_iter::<_, Config>(vars)?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Load the configuration from the environment
pub fn init() -> Result<Config> {
    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContactError;

    #[test]
    fn reads_url_and_defaults_pool_size() {
        let config = Config::from_iter([("DATABASE_URL", "postgres://u:p@localhost/contacts")])
            .unwrap();

        assert_eq!(config.database_url(), "postgres://u:p@localhost/contacts");
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn reads_explicit_pool_size() {
        let config = Config::from_iter([
            ("DATABASE_URL", "postgres://localhost/contacts"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();

        assert_eq!(config.database_max_connections, 12);
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let err = Config::from_iter(Vec::<(String, String)>::new()).unwrap_err();

        assert!(matches!(err, ContactError::Config(_)));
    }
}
