//! 链连接提供方：节点 JSON-RPC、ink! ABI 与合约调用句柄。

pub mod abi;
pub mod account;
pub mod codec;
pub mod contract;
pub mod error;
pub mod node;

pub use abi::ContractAbi;
pub use account::AccountId;
pub use contract::{ContractApi, ContractCall, load_contract};
pub use error::ChainError;
pub use node::NodeClient;
