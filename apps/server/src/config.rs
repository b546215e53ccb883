//! Configuration loading: CLI flags and the YAML configuration file.
//!
//! The catalog lives in the same file as the server settings. A missing or
//! unparseable file is fatal - the server cannot quote anything without a
//! catalog.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use cryptomotor_core::catalog::Model;

/// Environment variable naming the configuration file, checked before the
/// default search paths.
pub const CONFIG_PATH_ENV: &str = "CRYPTOMOTOR_CONFIG";

#[derive(Parser, Debug, Default)]
#[command(name = "cryptomotor", version, about = "Vehicle pricing quoted in BTC")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no configuration file found (searched --config, ${CONFIG_PATH_ENV}, /etc/cryptomotor, $HOME/.cryptomotor, .)")]
    NotFound,

    #[error("unable to read configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Server configuration, deserialized from the YAML file.
///
/// Keys are matched case-insensitively (PascalCase in the file, lowercase
/// aliases for loaders that normalize keys).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    #[serde(alias = "port")]
    pub port: u16,
    #[serde(alias = "listenhost", alias = "listen_host")]
    pub listen_host: String,
    #[serde(alias = "basepath", alias = "base_path")]
    pub base_path: String,
    /// Header carrying the real client address behind a proxy; empty means
    /// use the socket address.
    #[serde(rename = "ClientIPHeader", alias = "clientipheader", alias = "client_ip_header")]
    pub client_ip_header: String,
    #[serde(rename = "ReferralURL", alias = "referralurl", alias = "referral_url")]
    pub referral_url: String,
    #[serde(rename = "GeneratedByURL", alias = "generatedbyurl", alias = "generated_by_url")]
    pub generated_by_url: String,
    #[serde(alias = "debug")]
    pub debug: bool,
    /// Upper bound in seconds on spot-price staleness per currency.
    #[serde(alias = "spotrefreshseconds", alias = "spot_refresh_seconds")]
    pub spot_refresh_seconds: u64,
    #[serde(alias = "models")]
    pub models: HashMap<String, Model>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            listen_host: "127.0.0.1".to_string(),
            base_path: "/".to_string(),
            client_ip_header: String::new(),
            referral_url: String::new(),
            generated_by_url: "https://api.cryptomotor.dev".to_string(),
            debug: false,
            spot_refresh_seconds: 10,
            models: HashMap::new(),
        }
    }
}

impl Config {
    /// Load the configuration file named by the CLI, the environment or the
    /// default search paths, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Self::search_paths()
                .into_iter()
                .find(|path| path.exists())
                .ok_or(ConfigError::NotFound)?,
        };

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;
        let mut config: Config = settings.try_deserialize()?;

        if cli.debug {
            config.debug = true;
        }
        Ok(config)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from("/etc/cryptomotor/config.yaml"));
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".cryptomotor/config.yaml"));
        }
        paths.push(PathBuf::from("config.yaml"));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
Port: 9090
BasePath: /api
ReferralURL: https://ts.la/ref
SpotRefreshSeconds: 5
Models:
  s:
    DefaultVariant: longrange
    Variants:
      longrange:
        usd: 79990
    Options:
      red:
        Group: 0
        Prices:
          usd: 2500
      destinationfee:
        Prices:
          usd: 1200
"#;

    #[test]
    fn loads_yaml_with_defaults_for_missing_keys() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            debug: false,
        };
        let config = Config::load(&cli).unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.listen_host, "127.0.0.1"); // default
        assert_eq!(config.spot_refresh_seconds, 5);
        assert_eq!(config.referral_url, "https://ts.la/ref");

        let model = &config.models["s"];
        assert_eq!(model.default_variant, "longrange");
        assert_eq!(model.variants["longrange"]["usd"], 79990);
        assert_eq!(model.options["red"].group, Some(0));
        assert_eq!(model.options["red"].prices["usd"], 2500);
        assert_eq!(model.options["destinationfee"].group, None);
    }

    #[test]
    fn cli_debug_flag_overrides_the_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            debug: true,
        };
        let config = Config::load(&cli).unwrap();
        assert!(config.debug);
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/config.yaml")),
            debug: false,
        };
        assert!(Config::load(&cli).is_err());
    }
}
