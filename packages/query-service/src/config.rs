//! Service configuration.

use serde::Deserialize;

/// Loaded from `daocean.toml` (optional) and `DAOCEAN_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Only index logs emitted by this address. `None` indexes every log.
    #[serde(default)]
    pub contract_address: Option<String>,

    /// JSON-lines file of blocks to index before serving.
    #[serde(default)]
    pub replay_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            contract_address: None,
            replay_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("daocean").required(false))
            .add_source(config::Environment::with_prefix("DAOCEAN"))
            .build()
            .and_then(|c| c.try_deserialize())
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3050");
        assert!(config.contract_address.is_none());
        assert!(config.replay_path.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        // No daocean.toml in the package directory.
        let config = Config::load().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3050");
    }

    #[test]
    fn test_explicit_values() {
        let config: Config = serde_json::from_str(
            r#"{"bind_address":"127.0.0.1:9000","contract_address":"0xabc"}"#,
        )
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.contract_address.as_deref(), Some("0xabc"));
    }
}
