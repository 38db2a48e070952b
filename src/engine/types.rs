use std::fmt;

use rust_decimal::Decimal;

use crate::chain::AccountId;
use crate::config::{ExecutionConfig, TokensConfig};

use super::error::{EngineError, EngineResult};

pub use crate::wallet::TxReceipt;

/// 10^38 仍在 u128 内。
const MAX_TOKEN_DECIMALS: u32 = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasLimit {
    Limited(u64),
    /// 不设上限，由节点估算。
    Unlimited,
}

impl GasLimit {
    pub fn is_unlimited(self) -> bool {
        matches!(self, GasLimit::Unlimited)
    }
}

impl fmt::Display for GasLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasLimit::Limited(ref_time) => write!(f, "{ref_time}"),
            GasLimit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// 每次提交附带的执行参数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecParams {
    pub value_attached: u128,
    pub gas_limit: GasLimit,
}

impl ExecParams {
    /// 无上限 gas 必须显式开启 `allow_unlimited_gas`。
    pub fn from_config(config: &ExecutionConfig) -> EngineResult<Self> {
        if config.gas_limit.is_unlimited() && !config.allow_unlimited_gas {
            return Err(EngineError::InvalidConfig(
                "execution.gas_limit is unlimited but execution.allow_unlimited_gas is not set"
                    .to_string(),
            ));
        }
        Ok(Self {
            value_attached: config.value_attached,
            gas_limit: config.gas_limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: AccountId,
    pub symbol: Option<String>,
    pub decimals: u32,
}

impl TokenInfo {
    pub fn label(&self) -> String {
        match &self.symbol {
            Some(symbol) => symbol.clone(),
            None => self.address.short(),
        }
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// 配置中的代币表。未登记的地址使用默认精度。
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    entries: Vec<TokenInfo>,
    default_decimals: u32,
}

impl TokenRegistry {
    pub fn from_config(config: &TokensConfig) -> EngineResult<Self> {
        check_decimals("tokens.default_decimals", config.default_decimals)?;

        let mut entries: Vec<TokenInfo> = Vec::with_capacity(config.entries.len());
        for entry in &config.entries {
            let symbol = entry.symbol.trim();
            if symbol.is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "token {} has an empty symbol",
                    entry.address
                )));
            }
            check_decimals(symbol, entry.decimals)?;
            let address: AccountId = entry.address.parse().map_err(|err| {
                EngineError::InvalidConfig(format!("token {symbol}: {err}"))
            })?;
            if entries.iter().any(|known| {
                known.address == address
                    || known
                        .symbol
                        .as_deref()
                        .is_some_and(|known| known.eq_ignore_ascii_case(symbol))
            }) {
                return Err(EngineError::InvalidConfig(format!(
                    "token {symbol} is listed more than once"
                )));
            }
            entries.push(TokenInfo {
                address,
                symbol: Some(symbol.to_string()),
                decimals: entry.decimals,
            });
        }

        Ok(Self {
            entries,
            default_decimals: config.default_decimals,
        })
    }

    /// 接受登记的 symbol（大小写不敏感）、SS58 或 0x 地址。
    pub fn resolve(&self, input: &str) -> EngineResult<TokenInfo> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidPair("token identifier is empty".to_string()));
        }
        if let Some(token) = self.entries.iter().find(|token| {
            token
                .symbol
                .as_deref()
                .is_some_and(|symbol| symbol.eq_ignore_ascii_case(trimmed))
        }) {
            return Ok(token.clone());
        }

        let address: AccountId = trimmed
            .parse()
            .map_err(|_| EngineError::InvalidPair(format!("unknown token `{trimmed}`")))?;
        Ok(self
            .entries
            .iter()
            .find(|token| token.address == address)
            .cloned()
            .unwrap_or(TokenInfo {
                address,
                symbol: None,
                decimals: self.default_decimals,
            }))
    }
}

fn check_decimals(name: &str, decimals: u32) -> EngineResult<()> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(EngineError::InvalidConfig(format!(
            "{name}: decimals {decimals} exceeds {MAX_TOKEN_DECIMALS}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingPair {
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
}

impl TradingPair {
    pub fn new(token_in: TokenInfo, token_out: TokenInfo) -> EngineResult<Self> {
        if token_in.address == token_out.address {
            return Err(EngineError::InvalidPair(format!(
                "token_in and token_out are both {}",
                token_in.label()
            )));
        }
        Ok(Self {
            token_in,
            token_out,
        })
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.token_in, self.token_out)
    }
}

/// 合约返回的定点汇率，每次请求重新获取。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub rate: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub pair: TradingPair,
    pub amount_in: Decimal,
    pub slippage_pct: Decimal,
}

impl SwapRequest {
    /// 在任何网络调用之前校验数量与滑点。
    pub fn new(pair: TradingPair, amount_in: Decimal, slippage_pct: Decimal) -> EngineResult<Self> {
        super::guard::validate_amount(amount_in)?;
        super::guard::validate_slippage(slippage_pct)?;
        Ok(Self {
            pair,
            amount_in,
            slippage_pct,
        })
    }

    pub fn amount_in_units(&self) -> EngineResult<u128> {
        to_base_units(self.amount_in, self.pair.token_in.decimals)
    }
}

/// 滑点保护的结果，均为输出代币的最小单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardedAmounts {
    pub amount_out: u128,
    pub min_amount_out: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Swap => "swap",
            ActionKind::AddLiquidity => "add_liquidity",
            ActionKind::RemoveLiquidity => "remove_liquidity",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ActionKind::Swap => "Swap successful!",
            ActionKind::AddLiquidity => "Liquidity added successfully!",
            ActionKind::RemoveLiquidity => "Liquidity removed successfully!",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityKind {
    Add,
    Remove,
}

impl LiquidityKind {
    pub fn action(self) -> ActionKind {
        match self {
            LiquidityKind::Add => ActionKind::AddLiquidity,
            LiquidityKind::Remove => ActionKind::RemoveLiquidity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityRequest {
    pub kind: LiquidityKind,
    pub token: TokenInfo,
    pub amount: Decimal,
}

impl LiquidityRequest {
    pub fn new(kind: LiquidityKind, token: TokenInfo, amount: Decimal) -> EngineResult<Self> {
        super::guard::validate_amount(amount)?;
        Ok(Self {
            kind,
            token,
            amount,
        })
    }

    pub fn amount_units(&self) -> EngineResult<u128> {
        to_base_units(self.amount, self.token.decimals)
    }
}

/// 已完成校验、金额为链上最小单位的待提交动作。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardedAction {
    Swap {
        token_in: AccountId,
        amount_in: u128,
        token_out: AccountId,
        min_amount_out: u128,
    },
    AddLiquidity {
        token: AccountId,
        amount: u128,
    },
    RemoveLiquidity {
        token: AccountId,
        amount: u128,
    },
}

impl GuardedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            GuardedAction::Swap { .. } => ActionKind::Swap,
            GuardedAction::AddLiquidity { .. } => ActionKind::AddLiquidity,
            GuardedAction::RemoveLiquidity { .. } => ActionKind::RemoveLiquidity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Success(TxReceipt),
    Failure(String),
}

impl TxOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TxOutcome::Success(_))
    }
}

/// 人类单位 → 链上最小单位（`amount × 10^decimals`），结果必须是整数且在 u128 内。
pub fn to_base_units(amount: Decimal, decimals: u32) -> EngineResult<u128> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be positive, got {amount}"
        )));
    }
    let normalized = amount.normalize();
    let scale = normalized.scale();
    if scale > decimals {
        return Err(EngineError::InvalidAmount(format!(
            "{amount} has more than {decimals} decimal places"
        )));
    }
    let mantissa = u128::try_from(normalized.mantissa())
        .map_err(|_| EngineError::InvalidAmount(format!("{amount} is out of range")))?;
    10u128
        .checked_pow(decimals - scale)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| EngineError::InvalidAmount(format!("{amount} is too large")))
}

/// 链上最小单位 → 人类可读字符串，去掉末尾多余的 0。
pub fn format_units(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let digits = value.to_string();
    let width = decimals as usize;
    let padded = if digits.len() <= width {
        format!("{}{}", "0".repeat(width + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - width);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}
