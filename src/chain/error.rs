use thiserror::Error;

use crate::rpc::RpcError;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("unsupported node endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("node rpc failed: {0}")]
    Rpc(#[from] RpcError),
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("{0}")]
    Abi(String),
    #[error("contract reverted: {0}")]
    Reverted(String),
    #[error("unexpected contract response: {0}")]
    Decode(String),
}

impl ChainError {
    pub fn abi(reason: impl Into<String>) -> Self {
        Self::Abi(reason.into())
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }
}
