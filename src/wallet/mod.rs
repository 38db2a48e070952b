//! 钱包桥（wallet bridge）客户端。
//!
//! 私钥从不进入本进程：桥负责发现钱包扩展、列出账户、弹出确认框并签名广播，
//! 这里只做 JSON-RPC 封装与结果的强类型化。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chain::ContractCall;
use crate::chain::codec::{describe_dispatch_error, to_hex_data};
use crate::engine::GasLimit;
use crate::rpc::{JsonRpcClient, RpcError};

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet extension available")]
    NoExtension,
    #[error("no account available in the wallet")]
    NoAccount,
    /// 桥或钱包返回的原因，原样透传。
    #[error("{0}")]
    Rpc(#[from] RpcError),
    #[error("{0}")]
    Rejected(String),
    #[error("malformed bridge response: {0}")]
    Malformed(String),
}

impl WalletError {
    /// 桥本身不可达或超时；此时交易状态未知。
    pub fn is_transport(&self) -> bool {
        matches!(self, WalletError::Rpc(err) if err.is_transport())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InjectedAccount {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub key_type: Option<String>,
}

/// 交易进入区块后桥返回的回执。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub block_hash: Option<String>,
    pub status: String,
}

/// 需要钱包签名的一次提交。
#[derive(Debug, Clone)]
pub struct SignRequest {
    pub signer: String,
    pub call: ContractCall,
    pub value: u128,
    pub gas_limit: GasLimit,
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn enable(&self, app_name: &str) -> Result<Vec<Extension>, WalletError>;

    async fn accounts(&self) -> Result<Vec<InjectedAccount>, WalletError>;

    async fn sign_and_send(&self, request: &SignRequest) -> Result<TxReceipt, WalletError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmission {
    status: String,
    #[serde(default)]
    block_hash: Option<String>,
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    dispatch_error: Option<Value>,
}

impl RawSubmission {
    fn into_receipt(self) -> Result<TxReceipt, WalletError> {
        if let Some(error) = self.dispatch_error.filter(|value| !value.is_null()) {
            return Err(WalletError::Rejected(describe_dispatch_error(&error)));
        }
        match self.status.as_str() {
            "InBlock" | "Finalized" => {}
            "Invalid" | "Dropped" | "Usurped" | "FinalityTimeout" | "Retracted" => {
                return Err(WalletError::Rejected(format!(
                    "transaction {}",
                    self.status.to_lowercase()
                )));
            }
            other => {
                return Err(WalletError::Malformed(format!(
                    "unexpected terminal status `{other}`"
                )));
            }
        }
        let tx_hash = self
            .tx_hash
            .ok_or_else(|| WalletError::Malformed("missing txHash".to_string()))?;
        Ok(TxReceipt {
            tx_hash,
            block_hash: self.block_hash,
            status: self.status,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignAndSendParams<'a> {
    address: &'a str,
    dest: &'a str,
    value: String,
    gas_limit: Value,
    storage_deposit_limit: Value,
    data: String,
}

#[derive(Debug, Clone)]
pub struct WalletBridge {
    rpc: JsonRpcClient,
    submit_timeout: Duration,
}

impl WalletBridge {
    pub fn new(
        http: reqwest::Client,
        bridge_url: &str,
        request_timeout: Duration,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            rpc: JsonRpcClient::new(http, bridge_url, request_timeout),
            submit_timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }
}

fn sign_and_send_params(request: &SignRequest) -> SignAndSendParams<'_> {
    SignAndSendParams {
        address: &request.signer,
        dest: request.call.dest.address(),
        value: request.value.to_string(),
        gas_limit: gas_limit_param(request.gas_limit),
        storage_deposit_limit: Value::Null,
        data: to_hex_data(&request.call.data),
    }
}

fn gas_limit_param(limit: GasLimit) -> Value {
    match limit {
        GasLimit::Unlimited => Value::Null,
        GasLimit::Limited(ref_time) => json!({ "refTime": ref_time }),
    }
}

fn log_remote(method: &str, err: &RpcError) {
    if let RpcError::Remote {
        code,
        message,
        data,
        ..
    } = err
    {
        warn!(
            target: "wallet::bridge",
            method,
            code,
            data = ?data,
            "钱包桥返回错误: {message}"
        );
    }
}

#[async_trait]
impl WalletProvider for WalletBridge {
    async fn enable(&self, app_name: &str) -> Result<Vec<Extension>, WalletError> {
        let extensions: Vec<Extension> = self
            .rpc
            .call("bridge_enable", json!([app_name]))
            .await
            .inspect_err(|err| log_remote("bridge_enable", err))?;
        if extensions.is_empty() {
            return Err(WalletError::NoExtension);
        }
        info!(
            target: "wallet::bridge",
            bridge = %self.endpoint(),
            extensions = ?extensions.iter().map(|ext| ext.name.as_str()).collect::<Vec<_>>(),
            "钱包扩展已授权"
        );
        Ok(extensions)
    }

    async fn accounts(&self) -> Result<Vec<InjectedAccount>, WalletError> {
        let accounts: Vec<InjectedAccount> = self
            .rpc
            .call("bridge_accounts", json!([]))
            .await
            .inspect_err(|err| log_remote("bridge_accounts", err))?;
        if accounts.is_empty() {
            return Err(WalletError::NoAccount);
        }
        debug!(target: "wallet::bridge", count = accounts.len(), "读取钱包账户");
        Ok(accounts)
    }

    async fn sign_and_send(&self, request: &SignRequest) -> Result<TxReceipt, WalletError> {
        let params = serde_json::to_value(sign_and_send_params(request))
            .map_err(|err| WalletError::Malformed(err.to_string()))?;

        debug!(
            target: "wallet::bridge",
            message = %request.call.message,
            signer = %request.signer,
            "请求钱包签名并广播"
        );

        let raw: RawSubmission = self
            .rpc
            .call_with_timeout("bridge_signAndSend", json!([params]), self.submit_timeout)
            .await
            .inspect_err(|err| log_remote("bridge_signAndSend", err))?;
        raw.into_receipt()
    }
}
