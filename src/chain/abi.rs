//! ink! 合约元数据（ABI）解析。
//!
//! 启动时加载一次，按 label 查找编排器需要的四个 message，并立即校验 selector、
//! 参数个数与可变性，避免在用户点击时才发现 ABI 不匹配。

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::error::ChainError;

pub const MSG_GET_SWAP_RATE: &str = "get_swap_rate";
pub const MSG_SWAP_TOKENS: &str = "swap_tokens";
pub const MSG_ADD_LIQUIDITY: &str = "add_liquidity";
pub const MSG_REMOVE_LIQUIDITY: &str = "remove_liquidity";

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    #[serde(default)]
    contract: Option<ContractInfo>,
    #[serde(default)]
    spec: Option<ContractSpec>,
    #[serde(rename = "V3", default)]
    v3: Option<LegacyBody>,
}

#[derive(Debug, Deserialize)]
struct ContractInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LegacyBody {
    spec: ContractSpec,
}

#[derive(Debug, Deserialize)]
struct ContractSpec {
    #[serde(default)]
    messages: Vec<MessageSpec>,
}

#[derive(Debug, Deserialize)]
struct MessageSpec {
    label: String,
    selector: String,
    #[serde(default)]
    args: Vec<ArgSpec>,
    #[serde(default)]
    mutates: bool,
    #[serde(default)]
    payable: bool,
}

#[derive(Debug, Deserialize)]
struct ArgSpec {
    label: String,
}

/// 已校验的合约 message。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub label: String,
    pub selector: [u8; 4],
    pub arg_labels: Vec<String>,
    pub mutates: bool,
    pub payable: bool,
}

#[derive(Debug, Clone)]
pub struct ContractAbi {
    pub name: Option<String>,
    pub get_swap_rate: Message,
    pub swap_tokens: Message,
    pub add_liquidity: Message,
    pub remove_liquidity: Message,
}

impl ContractAbi {
    pub fn load(path: &Path) -> Result<Self, ChainError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            ChainError::abi(format!("failed to read ABI at {}: {err}", path.display()))
        })?;
        let abi = Self::from_json(&contents)?;
        debug!(
            target: "chain::abi",
            path = %path.display(),
            contract = ?abi.name,
            "合约 ABI 加载完成"
        );
        Ok(abi)
    }

    pub fn from_json(contents: &str) -> Result<Self, ChainError> {
        let document: MetadataDocument = serde_json::from_str(contents)
            .map_err(|err| ChainError::abi(format!("malformed ABI json: {err}")))?;

        let spec = match (document.spec, document.v3) {
            (Some(spec), _) => spec,
            (None, Some(legacy)) => legacy.spec,
            (None, None) => return Err(ChainError::abi("ABI has no `spec` section")),
        };

        let messages = spec.messages;
        Ok(Self {
            name: document.contract.map(|info| info.name),
            get_swap_rate: resolve(&messages, MSG_GET_SWAP_RATE, 2, false)?,
            swap_tokens: resolve(&messages, MSG_SWAP_TOKENS, 4, true)?,
            add_liquidity: resolve(&messages, MSG_ADD_LIQUIDITY, 2, true)?,
            remove_liquidity: resolve(&messages, MSG_REMOVE_LIQUIDITY, 2, true)?,
        })
    }

    pub fn transaction_messages(&self) -> [&Message; 3] {
        [&self.swap_tokens, &self.add_liquidity, &self.remove_liquidity]
    }
}

fn resolve(
    messages: &[MessageSpec],
    label: &str,
    arg_count: usize,
    mutates: bool,
) -> Result<Message, ChainError> {
    let wanted = normalize_label(label);
    let spec = messages
        .iter()
        .find(|message| normalize_label(&message.label) == wanted)
        .ok_or_else(|| ChainError::abi(format!("message `{label}` not found in ABI")))?;

    if spec.args.len() != arg_count {
        return Err(ChainError::abi(format!(
            "message `{label}` expects {arg_count} arguments, ABI declares {}",
            spec.args.len()
        )));
    }
    if spec.mutates != mutates {
        let expected = if mutates { "mutating" } else { "read-only" };
        return Err(ChainError::abi(format!(
            "message `{label}` is expected to be {expected}"
        )));
    }

    Ok(Message {
        label: spec.label.clone(),
        selector: parse_selector(label, &spec.selector)?,
        arg_labels: spec.args.iter().map(|arg| arg.label.clone()).collect(),
        mutates: spec.mutates,
        payable: spec.payable,
    })
}

fn parse_selector(label: &str, raw: &str) -> Result<[u8; 4], ChainError> {
    let body = raw.trim().trim_start_matches("0x");
    let bytes = hex::decode(body)
        .map_err(|err| ChainError::abi(format!("selector of `{label}` is not hex: {err}")))?;
    bytes
        .try_into()
        .map_err(|_| ChainError::abi(format!("selector of `{label}` must be 4 bytes")))
}

/// polkadot.js 会把 message 名转成 camelCase，两种写法都接受。
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|ch| *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
