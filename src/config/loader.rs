use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::SwapxConfig;

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["swapx.yaml", "config/swapx.yaml"];

pub const ENV_ENDPOINT_URL: &str = "SWAPX_ENDPOINT_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "SWAPX_CONTRACT_ADDRESS";
pub const ENV_BRIDGE_URL: &str = "SWAPX_BRIDGE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

pub fn load_config(path: Option<PathBuf>) -> Result<SwapxConfig, ConfigError> {
    let candidate_paths = match path {
        Some(p) => vec![p],
        None => DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .collect::<Vec<PathBuf>>(),
    };

    let mut config = None;
    for candidate in candidate_paths {
        if let Some(loaded) = try_load_file(&candidate)? {
            config = Some(loaded);
            break;
        }
    }

    let mut config = config.unwrap_or_default();
    apply_env_overrides(&mut config);
    Ok(config)
}

fn try_load_file(path: &Path) -> Result<Option<SwapxConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: SwapxConfig =
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(config))
}

fn apply_env_overrides(config: &mut SwapxConfig) {
    if let Some(url) = env_value(ENV_ENDPOINT_URL) {
        config.chain.endpoint_url = url;
    }
    if let Some(address) = env_value(ENV_CONTRACT_ADDRESS) {
        config.contract.address = address;
    }
    if let Some(url) = env_value(ENV_BRIDGE_URL) {
        config.wallet.bridge_url = url;
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::engine::GasLimit;

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "chain:\n  endpoint_url: http://node:9944\ncontract:\n  address: 5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY\nexecution:\n  gas_limit: unlimited\n  allow_unlimited_gas: true\n"
        )
        .expect("write config");

        let config = try_load_file(file.path())
            .expect("load")
            .expect("file exists");
        assert_eq!(config.chain.endpoint_url, "http://node:9944");
        assert_eq!(config.chain.request_timeout_ms, 10_000);
        assert_eq!(config.execution.gas_limit, GasLimit::Unlimited);
        assert!(config.execution.allow_unlimited_gas);
        assert_eq!(config.wallet.app_name, "SwapX DApp");
    }

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.yaml");
        assert!(try_load_file(&missing).expect("no io error").is_none());
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "chain: [unterminated").expect("write config");
        let err = try_load_file(file.path()).expect_err("parse must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse config"));
    }
}
