//! Configuration loading for the gazetteer client.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth: AuthConfig,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Opaque session token; refresh and expiry are handled externally.
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (set GAZETTEER_CLIENT_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("GAZETTEER_CLIENT_CONFIG")
            .ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(Path::new(&path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.auth.token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "auth.token",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_config() -> ClientConfig {
        ClientConfig {
            base_url: "https://gazetteer.example.gov.uk/api".to_string(),
            auth: AuthConfig {
                token: "session-token".to_string(),
            },
            request_timeout_ms: 5_000,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut config = base_config();
        config.auth.token = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base_config();
        config.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_path_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://gazetteer.example.gov.uk/api\"\n\
             request_timeout_ms = 5000\n\n\
             [auth]\n\
             token = \"session-token\""
        )
        .unwrap();

        let config = ClientConfig::from_path(file.path()).unwrap();
        assert_eq!(config.request_timeout_ms, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed: Result<ClientConfig, _> = toml::from_str(
            "base_url = \"x\"\nrequest_timeout_ms = 1\nextra = true\n[auth]\ntoken = \"t\"",
        );
        assert!(parsed.is_err());
    }
}
