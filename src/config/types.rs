use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::de::{Deserializer, Error as DeError, Unexpected, Visitor};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::engine::GasLimit;

#[derive(Debug, Clone, Deserialize)]
pub struct SwapxConfig {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub tokens: TokensConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "super::default_endpoint_url")]
    pub endpoint_url: String,
    #[serde(default = "super::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default = "super::default_abi_path")]
    pub abi_path: PathBuf,
    /// 报价的定点精度分母；超过 u64 的取值需写成字符串。
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default = "super::default_rate_scale")]
    pub rate_scale: u128,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "super::default_bridge_url")]
    pub bridge_url: String,
    #[serde(default = "super::default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default = "super::default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    pub value_attached: u128,
    #[serde(default = "super::default_gas_limit")]
    pub gas_limit: GasLimit,
    #[serde(default)]
    pub allow_unlimited_gas: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    #[serde(default = "super::default_token_decimals")]
    pub default_decimals: u32,
    #[serde(default)]
    pub entries: Vec<TokenEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub symbol: String,
    pub address: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "super::default_logging_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default = "super::default_logging_profile")]
    pub profile: LoggingProfile,
    #[serde(default = "super::default_timezone_offset_hours")]
    pub timezone_offset_hours: i8,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingProfile {
    Lean,
    Verbose,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrometheusConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default = "super::default_prometheus_listen")]
    pub listen: String,
}

impl<'de> Deserialize<'de> for GasLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GasLimitVisitor;

        impl<'de> Visitor<'de> for GasLimitVisitor {
            type Value = GasLimit;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("正整数、-1 或字符串 \"unlimited\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                let trimmed = value.trim();
                if trimmed.eq_ignore_ascii_case("unlimited") || trimmed == "-1" {
                    return Ok(GasLimit::Unlimited);
                }
                let parsed = trimmed
                    .parse::<u64>()
                    .map_err(|_| DeError::invalid_value(Unexpected::Str(value), &self))?;
                self.visit_u64(parsed)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                if value == 0 {
                    return Err(DeError::invalid_value(Unexpected::Unsigned(0), &"正整数"));
                }
                Ok(GasLimit::Limited(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                if value == -1 {
                    return Ok(GasLimit::Unlimited);
                }
                if value <= 0 {
                    return Err(DeError::invalid_value(
                        Unexpected::Signed(value),
                        &"大于 0 的整数或 -1",
                    ));
                }
                self.visit_u64(value as u64)
            }
        }

        deserializer.deserialize_any(GasLimitVisitor)
    }
}
