use std::path::PathBuf;

use crate::engine::GasLimit;

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

use self::types as cfg;

pub(crate) fn default_endpoint_url() -> String {
    "ws://127.0.0.1:9944".to_string()
}

pub(crate) fn default_request_timeout_ms() -> u64 {
    10_000
}

pub(crate) fn default_abi_path() -> PathBuf {
    PathBuf::from("target/ink/swapx.json")
}

pub(crate) fn default_rate_scale() -> u128 {
    1_000_000_000_000_000_000
}

pub(crate) fn default_bridge_url() -> String {
    "http://127.0.0.1:9955".to_string()
}

pub(crate) fn default_app_name() -> String {
    "SwapX DApp".to_string()
}

pub(crate) fn default_submit_timeout_ms() -> u64 {
    120_000
}

pub(crate) fn default_gas_limit() -> GasLimit {
    GasLimit::Limited(50_000_000_000)
}

pub(crate) fn default_token_decimals() -> u32 {
    18
}

pub(crate) fn default_logging_level() -> String {
    "info".to_string()
}

pub(crate) fn default_logging_profile() -> cfg::LoggingProfile {
    cfg::LoggingProfile::Lean
}

pub(crate) fn default_timezone_offset_hours() -> i8 {
    0
}

pub(crate) fn default_prometheus_listen() -> String {
    "0.0.0.0:9898".to_string()
}

impl Default for cfg::SwapxConfig {
    fn default() -> Self {
        Self {
            chain: cfg::ChainConfig::default(),
            contract: cfg::ContractConfig::default(),
            wallet: cfg::WalletConfig::default(),
            execution: cfg::ExecutionConfig::default(),
            tokens: cfg::TokensConfig::default(),
            logging: cfg::LoggingConfig::default(),
            prometheus: cfg::PrometheusConfig::default(),
        }
    }
}

impl Default for cfg::ChainConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for cfg::ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            abi_path: default_abi_path(),
            rate_scale: default_rate_scale(),
        }
    }
}

impl Default for cfg::WalletConfig {
    fn default() -> Self {
        Self {
            bridge_url: default_bridge_url(),
            app_name: default_app_name(),
            account: None,
            submit_timeout_ms: default_submit_timeout_ms(),
        }
    }
}

impl Default for cfg::ExecutionConfig {
    fn default() -> Self {
        Self {
            value_attached: 0,
            gas_limit: default_gas_limit(),
            allow_unlimited_gas: false,
        }
    }
}

impl Default for cfg::TokensConfig {
    fn default() -> Self {
        Self {
            default_decimals: default_token_decimals(),
            entries: Vec::new(),
        }
    }
}

impl Default for cfg::LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            json: false,
            profile: default_logging_profile(),
            timezone_offset_hours: default_timezone_offset_hours(),
        }
    }
}

impl Default for cfg::PrometheusConfig {
    fn default() -> Self {
        Self {
            enable: false,
            listen: default_prometheus_listen(),
        }
    }
}
