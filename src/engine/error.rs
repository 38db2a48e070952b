use rust_decimal::Decimal;
use thiserror::Error;

use crate::chain::ChainError;
use crate::wallet::WalletError;

/// 编排器错误分类。Display 文本直接进入状态栏，因此保持面向用户的英文描述。
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("no wallet extension available")]
    NoWalletAvailable,
    #[error("no account available in the wallet")]
    NoAccountAvailable,
    #[error("quote unavailable: {0}")]
    QuoteUnavailable(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid slippage {0}%: must be in [0, 100)")]
    InvalidSlippage(Decimal),
    #[error("invalid trading pair: {0}")]
    InvalidPair(String),
    /// 钱包或合约给出的原因，原样透传。
    #[error("{0}")]
    SubmissionRejected(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("contract ABI error: {0}")]
    Abi(String),
}

impl EngineError {
    pub fn label(&self) -> &'static str {
        match self {
            EngineError::Connection(_) => "connection",
            EngineError::NoWalletAvailable => "no_wallet",
            EngineError::NoAccountAvailable => "no_account",
            EngineError::QuoteUnavailable(_) => "quote_unavailable",
            EngineError::InvalidAmount(_) => "invalid_amount",
            EngineError::InvalidSlippage(_) => "invalid_slippage",
            EngineError::InvalidPair(_) => "invalid_pair",
            EngineError::SubmissionRejected(_) => "submission_rejected",
            EngineError::InvalidConfig(_) => "invalid_config",
            EngineError::Abi(_) => "abi",
        }
    }
}

impl From<ChainError> for EngineError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Abi(detail) => EngineError::Abi(detail),
            ChainError::InvalidAddress { .. } => EngineError::InvalidConfig(err.to_string()),
            other => EngineError::Connection(other.to_string()),
        }
    }
}

impl From<WalletError> for EngineError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NoExtension => EngineError::NoWalletAvailable,
            WalletError::NoAccount => EngineError::NoAccountAvailable,
            other => EngineError::Connection(other.to_string()),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
