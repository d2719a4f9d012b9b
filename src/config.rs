use crate::types::DEFAULT_OSC_ADDRESS;
use std::env;

/// Bridge configuration loaded from environment variables.
///
/// `creds.env` in the working directory is honored for compatibility with
/// earlier deployments, then `.env`, then the process environment.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Cortex application client id.
    pub client_id: String,
    /// Cortex application client secret.
    pub client_secret: String,
    /// Host the derived metrics are sent to.
    pub osc_host: String,
    /// UDP port on the OSC consumer.
    pub osc_port: u16,
    /// OSC address the metrics vector is published under.
    pub osc_address: String,
    /// Specific headset to target; first available when unset.
    pub headset_id: Option<String>,
}

impl BridgeConfig {
    /// Load configuration. The four credentials/endpoint settings are
    /// required; startup must not proceed without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::from_filename("creds.env").ok();
        dotenvy::dotenv().ok();

        let client_id = require("CORTEX_CLIENT_ID")?;
        let client_secret = require("CORTEX_CLIENT_SECRET")?;
        let osc_host = require("OSC_HOST")?;
        let osc_port = require("OSC_PORT")?
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            client_id,
            client_secret,
            osc_host,
            osc_port,
            osc_address: env::var("OSC_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_OSC_ADDRESS.to_string()),
            headset_id: env::var("CORTEX_HEADSET_ID").ok(),
        })
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so everything lives in one test.
    #[test]
    fn from_env_requires_the_four_core_settings() {
        env::set_var("CORTEX_CLIENT_ID", "client-id");
        env::set_var("CORTEX_CLIENT_SECRET", "client-secret");
        env::set_var("OSC_HOST", "127.0.0.1");
        env::set_var("OSC_PORT", "9000");
        env::remove_var("OSC_ADDRESS");
        env::remove_var("CORTEX_HEADSET_ID");

        let config = BridgeConfig::from_env().unwrap();
        assert_eq!(config.osc_host, "127.0.0.1");
        assert_eq!(config.osc_port, 9000);
        assert_eq!(config.osc_address, DEFAULT_OSC_ADDRESS);
        assert!(config.headset_id.is_none());

        env::set_var("OSC_PORT", "not-a-port");
        assert!(matches!(
            BridgeConfig::from_env(),
            Err(ConfigError::InvalidPort)
        ));
        env::set_var("OSC_PORT", "9000");

        env::remove_var("CORTEX_CLIENT_SECRET");
        match BridgeConfig::from_env() {
            Err(ConfigError::MissingEnvVar(key)) => {
                assert_eq!(key, "CORTEX_CLIENT_SECRET");
            }
            other => panic!("expected missing-variable error, got {:?}", other),
        }
    }
}
