//! 合约调用数据的 SCALE 编码，以及 `contracts_call` 结果的解码。

use serde::Deserialize;
use serde_json::Value;

use super::account::AccountId;
use super::error::ChainError;

/// ink! `ReturnFlags` 中的 REVERT 位。
const FLAG_REVERT: u32 = 1;

#[derive(Debug, Clone, Copy)]
pub enum CallArg<'a> {
    Account(&'a AccountId),
    U128(u128),
}

/// selector ‖ SCALE(args)。AccountId 为定长 32 字节，u128 为 16 字节小端。
pub fn encode_call(selector: [u8; 4], args: &[CallArg<'_>]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * 32);
    data.extend_from_slice(&selector);
    for arg in args {
        match arg {
            CallArg::Account(account) => data.extend_from_slice(account.as_bytes()),
            CallArg::U128(value) => data.extend_from_slice(&value.to_le_bytes()),
        }
    }
    data
}

pub fn to_hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn from_hex_data(raw: &str) -> Result<Vec<u8>, ChainError> {
    hex::decode(raw.trim().trim_start_matches("0x"))
        .map_err(|err| ChainError::decode(format!("return data is not hex: {err}")))
}

/// `contracts_call` 的返回结构（ContractExecResult）。只保留编排器关心的字段。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractExecResult {
    #[serde(default)]
    pub gas_consumed: Option<Value>,
    #[serde(default)]
    pub gas_required: Option<Value>,
    #[serde(default)]
    pub debug_message: Option<String>,
    pub result: ExecOutcome,
}

#[derive(Debug, Deserialize)]
pub enum ExecOutcome {
    Ok(ExecReturnValue),
    Err(Value),
}

#[derive(Debug, Deserialize)]
pub struct ExecReturnValue {
    #[serde(default)]
    pub flags: Value,
    pub data: String,
}

impl ExecReturnValue {
    fn flag_bits(&self) -> u32 {
        match &self.flags {
            Value::Number(bits) => bits.as_u64().unwrap_or(0) as u32,
            Value::Object(map) => map
                .get("bits")
                .and_then(Value::as_u64)
                .map(|bits| bits as u32)
                .unwrap_or(0),
            _ => 0,
        }
    }

    pub fn reverted(&self) -> bool {
        self.flag_bits() & FLAG_REVERT != 0
    }
}

impl ContractExecResult {
    /// dispatch 错误或 REVERT 都视为失败，否则返回原始返回字节。
    pub fn into_return_data(self) -> Result<Vec<u8>, ChainError> {
        let debug = self
            .debug_message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty() && *message != "0x")
            .map(str::to_string);

        match self.result {
            ExecOutcome::Err(error) => Err(ChainError::Reverted(describe_dispatch_error(&error))),
            ExecOutcome::Ok(value) if value.reverted() => Err(ChainError::Reverted(
                debug.unwrap_or_else(|| "execution reverted".to_string()),
            )),
            ExecOutcome::Ok(value) => from_hex_data(&value.data),
        }
    }
}

pub fn describe_dispatch_error(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            if let Some(module) = map.get("Module") {
                let index = module.get("index").and_then(Value::as_u64);
                let code = module.get("error").map(|code| match code {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                });
                return match (index, code) {
                    (Some(index), Some(code)) => format!("module error {index}:{code}"),
                    _ => format!("module error {module}"),
                };
            }
            map.keys()
                .next()
                .cloned()
                .unwrap_or_else(|| error.to_string())
        }
        other => other.to_string(),
    }
}

/// 解码 message 返回的 u128。
///
/// ink! 4+ 的 message 返回值包裹在 `Result<T, LangError>` 中：`[0, T]` 为 Ok，
/// `[1, LangError]` 为 Err（通常只有 2 字节）。旧版本直接返回 16 字节的 T。
pub fn decode_u128_return(data: &[u8]) -> Result<u128, ChainError> {
    let payload = match data {
        bare if bare.len() == 16 => bare,
        [0, rest @ ..] if rest.len() == 16 => rest,
        [1, ..] => {
            return Err(ChainError::Reverted(
                "contract could not read input".to_string(),
            ));
        }
        [other, rest @ ..] if rest.len() == 16 => {
            return Err(ChainError::decode(format!(
                "unknown result discriminant {other}"
            )));
        }
        _ => {
            return Err(ChainError::decode(format!(
                "expected 16 or 17 bytes for u128, got {}",
                data.len()
            )));
        }
    };

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(payload);
    Ok(u128::from_le_bytes(bytes))
}
