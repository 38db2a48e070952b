//! 最小化的 JSON-RPC 2.0 HTTP 客户端，节点与钱包桥共用。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{method} request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout {
        method: String,
        endpoint: String,
        timeout_ms: u64,
    },
    #[error("{method} request failed: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} returned HTTP {status}: {body}")]
    HttpStatus {
        method: String,
        status: reqwest::StatusCode,
        body: String,
    },
    /// 远端返回的 JSON-RPC error 对象；message 原样保留。
    #[error("{message}")]
    Remote {
        method: String,
        code: i64,
        message: String,
        data: Option<Value>,
    },
    #[error("{method} response could not be decoded: {detail}")]
    Decode { method: String, detail: String },
}

impl RpcError {
    /// 传输层错误（连接失败、超时、非 2xx）。
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RpcError::Timeout { .. } | RpcError::Transport { .. } | RpcError::HttpStatus { .. }
        )
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl JsonRpcClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn call<T>(&self, method: &str, params: Value) -> Result<T, RpcError>
    where
        T: DeserializeOwned,
    {
        self.call_with_timeout(method, params, self.timeout).await
    }

    pub async fn call_with_timeout<T>(
        &self,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<T, RpcError>
    where
        T: DeserializeOwned,
    {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        trace!(
            target: "rpc",
            endpoint = %self.endpoint,
            method,
            id,
            "发送 JSON-RPC 请求"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| self.map_transport(method, timeout, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.map_transport(method, timeout, err))?;

        if !status.is_success() {
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                status,
                body,
            });
        }

        decode_response(method, &body)
    }

    fn map_transport(&self, method: &str, timeout: Duration, err: reqwest::Error) -> RpcError {
        if err.is_timeout() {
            RpcError::Timeout {
                method: method.to_string(),
                endpoint: self.endpoint.clone(),
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            RpcError::Transport {
                method: method.to_string(),
                source: err,
            }
        }
    }
}

pub(crate) fn decode_response<T>(method: &str, body: &str) -> Result<T, RpcError>
where
    T: DeserializeOwned,
{
    let envelope: RpcEnvelope = serde_json::from_str(body).map_err(|err| RpcError::Decode {
        method: method.to_string(),
        detail: err.to_string(),
    })?;

    if let Some(error) = envelope.error {
        return Err(RpcError::Remote {
            method: method.to_string(),
            code: error.code,
            message: error.message,
            data: error.data,
        });
    }

    let result = envelope.result.unwrap_or(Value::Null);
    serde_json::from_value(result).map_err(|err| RpcError::Decode {
        method: method.to_string(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_result_payload() {
        let body = r#"{"jsonrpc":"2.0","id":7,"result":"Development"}"#;
        let chain: String = decode_response("system_chain", body).expect("decode");
        assert_eq!(chain, "Development");
    }

    #[test]
    fn remote_error_keeps_message_verbatim() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"Cancelled by user"}}"#;
        let err = decode_response::<Value>("bridge_signAndSend", body).expect_err("error");
        assert_eq!(err.to_string(), "Cancelled by user");
        assert!(!err.is_transport());
        match err {
            RpcError::Remote { code, .. } => assert_eq!(code, 4001),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_response::<Value>("system_health", "not json").expect_err("error");
        assert!(matches!(err, RpcError::Decode { .. }));
    }
}
