use std::fmt;
use std::str::FromStr;

use blake2::{Blake2b512, Digest};

use super::error::ChainError;

const PUBLIC_KEY_LEN: usize = 32;
const SS58_CHECKSUM_LEN: usize = 2;
const SS58_CONTEXT: &[u8] = b"SS58PRE";

/// 32 字节账户/合约地址。保留用户输入的原始文本，RPC 参数里原样发送。
#[derive(Clone, Eq)]
pub struct AccountId {
    public: [u8; PUBLIC_KEY_LEN],
    address: String,
}

impl AccountId {
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public))
    }

    /// 日志用的缩写形式。
    pub fn short(&self) -> String {
        let addr = &self.address;
        if addr.len() <= 16 {
            return addr.clone();
        }
        format!("{}...{}", &addr[..8], &addr[addr.len() - 6..])
    }
}

impl PartialEq for AccountId {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl std::hash::Hash for AccountId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.public.hash(state);
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.address)
    }
}

impl FromStr for AccountId {
    type Err = ChainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid(value, "empty address"));
        }

        let public = match trimmed.strip_prefix("0x") {
            Some(hex_body) => decode_hex(trimmed, hex_body)?,
            None => decode_ss58(trimmed)?,
        };

        Ok(Self {
            public,
            address: trimmed.to_string(),
        })
    }
}

fn decode_hex(original: &str, body: &str) -> Result<[u8; PUBLIC_KEY_LEN], ChainError> {
    let bytes = hex::decode(body).map_err(|err| invalid(original, &err.to_string()))?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| invalid(original, &format!("expected 32 bytes, got {}", bytes.len())))
}

/// SS58：`prefix ‖ pubkey ‖ blake2b-512("SS58PRE" ‖ prefix ‖ pubkey)[..2]`。
fn decode_ss58(address: &str) -> Result<[u8; PUBLIC_KEY_LEN], ChainError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|err| invalid(address, &err.to_string()))?;

    let first = *bytes.first().ok_or_else(|| invalid(address, "empty payload"))?;
    let prefix_len = match first {
        0..=63 => 1,
        64..=127 => 2,
        _ => return Err(invalid(address, "reserved ss58 prefix")),
    };

    let expected = prefix_len + PUBLIC_KEY_LEN + SS58_CHECKSUM_LEN;
    if bytes.len() != expected {
        return Err(invalid(
            address,
            &format!("expected {expected} decoded bytes, got {}", bytes.len()),
        ));
    }

    let (body, checksum) = bytes.split_at(prefix_len + PUBLIC_KEY_LEN);
    let digest = Blake2b512::new()
        .chain_update(SS58_CONTEXT)
        .chain_update(body)
        .finalize();
    if digest[..SS58_CHECKSUM_LEN] != *checksum {
        return Err(invalid(address, "ss58 checksum mismatch"));
    }

    let mut public = [0u8; PUBLIC_KEY_LEN];
    public.copy_from_slice(&body[prefix_len..]);
    Ok(public)
}

fn invalid(address: &str, reason: &str) -> ChainError {
    ChainError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}
