//! Configuration loading and validation for the envelope gateway.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated gateway configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Standard-base64 encoding of the 16, 24, or 32 byte payload key.
    /// **Required.**
    pub secret_key: String,

    /// TCP port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    ///
    /// Whether `secret_key` decodes to a usable AES key is checked when the
    /// key itself is constructed; here we only require the variable to be set.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.secret_key, "SECRET_KEY")?;

        if self.listen_port == 0 {
            anyhow::bail!("LISTEN_PORT must be a non-zero TCP port");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

// The configured key must not leak through Debug formatting.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            secret_key: "Z2F0ZXdheS10ZXN0LWtleQ==".into(),
            listen_port: default_listen_port(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_a_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_secret_key() {
        let cfg = Config {
            secret_key: "  ".into(),
            ..valid_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let cfg = Config {
            listen_port: 0,
            ..valid_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_the_secret_key() {
        let rendered = format!("{:?}", valid_config());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("Z2F0ZXdheS"));
    }
}
