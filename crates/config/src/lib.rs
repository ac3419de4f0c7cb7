//! Configuration management for jeth
//!
//! The configuration is loaded once at startup and handed to each command, so no command reads
//! or mutates process-wide state.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::{fs, path::PathBuf};
use tracing::{debug, info};

/// Seconds to wait for a batch of RPC lookups when nothing else is configured.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    after_help = "Keys: rpc_url, rpc_timeout_secs",
    override_usage = "jeth config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. Command arguments that
/// are left unset fall back to these values.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// How long to wait for concurrent RPC lookups, in seconds
    pub rpc_timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration { rpc_url: "".to_string(), rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS }
    }
}

/// `$HOME/.jeth/config.toml`
#[allow(deprecated)]
fn config_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".jeth");
    home.push("config.toml");
    Ok(home)
}

impl Configuration {
    /// Returns the current configuration, creating the file with defaults if it doesn't exist.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        // if the config file doesn't exist, create it
        if !path.exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read and parse the config file
        let contents = fs::read_to_string(&path)?;
        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        // load mesc config if enabled
        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("jeth"))? {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string(&self)
            .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.jeth/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and write it to disk.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "rpc_timeout_secs" => {
                self.rpc_timeout_secs = value.parse::<u64>().map_err(|_| {
                    Error::ParseError(format!("'{value}' is not a valid number of seconds"))
                })?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        // write the updated config to disk
        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            return Err(Error::Generic(format!(
                "found key '{}' but no value to set. Please specify a value to set, use `jeth config --help` for more information.",
                args.key
            )));
        }
    } else {
        // no key is set, print the config file
        let config = Configuration::load()?;
        print!(
            "{}",
            toml::to_string(&config)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?
        );
        info!("use `jeth config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

/// Parse user input --rpc-url into a full url
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("jeth")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.rpc_url, "");
        assert_eq!(config.rpc_timeout_secs, DEFAULT_RPC_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");

        assert_eq!(config, Configuration::default());
        assert!(config_path().expect("no config path").exists());
    }

    #[test]
    #[serial]
    fn test_save_configuration() {
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::default();

        config.update("rpc_url", "http://localhost:8545").expect("failed to update rpc_url");
        config.update("rpc_timeout_secs", "5").expect("failed to update rpc_timeout_secs");

        let loaded_config = Configuration::load().expect("failed to load config file");
        assert_eq!(loaded_config.rpc_url, "http://localhost:8545");
        assert_eq!(loaded_config.rpc_timeout_secs, 5);

        Configuration::delete().expect("failed to delete config file");
    }

    #[test]
    #[serial]
    fn test_update_rejects_bad_input() {
        let mut config = Configuration::default();
        assert!(matches!(config.update("etherscan_api_key", "x"), Err(Error::Generic(_))));
        assert!(matches!(config.update("rpc_timeout_secs", "soon"), Err(Error::ParseError(_))));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    #[serial]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Configuration =
            toml::from_str("rpc_url = \"http://localhost:8545\"").expect("failed to parse");
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.rpc_timeout_secs, DEFAULT_RPC_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_delete_configuration() {
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::load().expect("failed to load config file");
        config.update("rpc_url", "http://localhost:8545").expect("failed to update rpc_url");

        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config.rpc_url, "");
    }

    #[test]
    #[serial]
    fn test_config_key_without_value() {
        let args = ConfigArgs { key: "rpc_url".to_string(), value: String::new() };
        assert!(matches!(config(args), Err(Error::Generic(_))));
    }

    #[test]
    fn test_parse_url_arg_passthrough() {
        if mesc::is_mesc_enabled() {
            return;
        }
        assert_eq!(parse_url_arg("http://localhost:8545"), Ok("http://localhost:8545".to_string()));
    }
}
