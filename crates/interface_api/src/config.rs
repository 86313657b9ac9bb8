//! API configuration

use serde::Deserialize;

/// API configuration
///
/// Every field has a default, so any subset may be supplied through the
/// environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Require tax ids to be valid CNPJs and store them punctuated
    pub strict_tax_id: bool,
    /// Allow any origin, method and header (browser form on another port)
    pub cors_permissive: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/fundos".to_string(),
            db_max_connections: 10,
            log_level: "info".to_string(),
            strict_tax_id: false,
            cors_permissive: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// `DATABASE_URL` is honoured when `API_DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true));

        if std::env::var("API_DATABASE_URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                builder = builder.set_override("database_url", url)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(!config.strict_tax_id);
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9000)
            .unwrap()
            .set_override("strict_tax_id", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.strict_tax_id);
        assert_eq!(config.host, "0.0.0.0");
    }
}
