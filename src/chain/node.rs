use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};
use url::Url;

use crate::rpc::JsonRpcClient;

use super::account::AccountId;
use super::codec::{ContractExecResult, to_hex_data};
use super::error::ChainError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeHealth {
    pub peers: u64,
    pub is_syncing: bool,
    #[serde(default)]
    pub should_have_peers: bool,
}

/// 节点连接句柄。建立后只读共享。
#[derive(Debug, Clone)]
pub struct NodeClient {
    rpc: JsonRpcClient,
    chain: String,
}

impl NodeClient {
    /// 连接节点并确认其存活：`system_chain` 与 `system_health` 都必须成功。
    pub async fn connect(
        http: reqwest::Client,
        endpoint_url: &str,
        timeout: Duration,
    ) -> Result<Self, ChainError> {
        let http_endpoint = http_endpoint(endpoint_url)?;
        let rpc = JsonRpcClient::new(http, http_endpoint.as_str(), timeout);

        let chain: String = rpc.call("system_chain", json!([])).await?;
        let health: NodeHealth = rpc.call("system_health", json!([])).await?;

        info!(
            target: "chain::node",
            endpoint = %endpoint_url,
            rpc = %http_endpoint,
            chain = %chain,
            peers = health.peers,
            syncing = health.is_syncing,
            should_have_peers = health.should_have_peers,
            "节点连接成功"
        );

        Ok(Self { rpc, chain })
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    /// 只读 dry-run：value、gas、存储押金均不设上限，节点不会产生任何状态变更。
    pub async fn contracts_call(
        &self,
        origin: &AccountId,
        dest: &AccountId,
        input_data: &[u8],
    ) -> Result<Vec<u8>, ChainError> {
        let request = contracts_call_params(origin, dest, input_data);
        let result: ContractExecResult = self.rpc.call("contracts_call", json!([request])).await?;
        debug!(
            target: "chain::node",
            dest = %dest.short(),
            gas_consumed = ?result.gas_consumed,
            gas_required = ?result.gas_required,
            "contracts_call 返回"
        );
        result.into_return_data()
    }
}

fn contracts_call_params(origin: &AccountId, dest: &AccountId, input_data: &[u8]) -> Value {
    json!({
        "origin": origin.address(),
        "dest": dest.address(),
        "value": 0,
        "gasLimit": Value::Null,
        "storageDepositLimit": Value::Null,
        "inputData": to_hex_data(input_data),
    })
}

/// WebSocket 端点映射到同主机同端口的 HTTP JSON-RPC。Substrate 节点在同一端口同时提供两者。
pub fn http_endpoint(endpoint_url: &str) -> Result<Url, ChainError> {
    let invalid = |reason: String| ChainError::InvalidEndpoint {
        endpoint: endpoint_url.to_string(),
        reason,
    };

    let mut url = Url::parse(endpoint_url.trim()).map_err(|err| invalid(err.to_string()))?;
    let scheme = match url.scheme() {
        "ws" | "http" => "http",
        "wss" | "https" => "https",
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    };
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    url.set_scheme(scheme)
        .map_err(|_| invalid(format!("cannot switch scheme to {scheme}")))?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn websocket_endpoints_map_to_http() {
        let url = http_endpoint("ws://127.0.0.1:9944").expect("ws");
        assert_eq!(url.as_str(), "http://127.0.0.1:9944/");
        let url = http_endpoint("wss://rpc.example.org/path").expect("wss");
        assert_eq!(url.as_str(), "https://rpc.example.org/path");
    }

    #[test]
    fn http_endpoints_pass_through() {
        let url = http_endpoint("http://localhost:9933").expect("http");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(9933));
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let err = http_endpoint("ftp://node:21").expect_err("ftp");
        assert!(matches!(err, ChainError::InvalidEndpoint { .. }));
        assert!(http_endpoint("not a url").is_err());
    }

    #[test]
    fn dry_run_request_is_unbounded_and_hex_encoded() {
        let origin: AccountId = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
            .parse()
            .expect("origin");
        let dest: AccountId = "0x0909090909090909090909090909090909090909090909090909090909090909"
            .parse()
            .expect("dest");
        let params = contracts_call_params(&origin, &dest, &[0x8a, 0x5c, 0x8c, 0x5e, 0x01]);
        assert_eq!(
            params,
            json!({
                "origin": "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
                "dest": "0x0909090909090909090909090909090909090909090909090909090909090909",
                "value": 0,
                "gasLimit": null,
                "storageDepositLimit": null,
                "inputData": "0x8a5c8c5e01",
            })
        );
    }

    #[test]
    fn health_payload_decodes() {
        let health: NodeHealth =
            serde_json::from_str(r#"{"peers":0,"isSyncing":false,"shouldHavePeers":false}"#)
                .expect("health");
        assert_eq!(health.peers, 0);
        assert!(!health.is_syncing);
    }
}
