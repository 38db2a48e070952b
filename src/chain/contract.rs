use async_trait::async_trait;
use tracing::debug;

use super::abi::{ContractAbi, Message};
use super::account::AccountId;
use super::codec::{CallArg, decode_u128_return, encode_call};
use super::error::ChainError;
use super::node::NodeClient;

/// 已编码、等待钱包签名的合约调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub dest: AccountId,
    pub message: String,
    pub data: Vec<u8>,
    pub payable: bool,
}

/// 合约调用句柄的抽象，便于在测试中替换为内存实现。
#[async_trait]
pub trait ContractApi: Send + Sync {
    fn address(&self) -> &AccountId;

    async fn query_swap_rate(
        &self,
        caller: &AccountId,
        token_in: &AccountId,
        token_out: &AccountId,
    ) -> Result<u128, ChainError>;

    fn swap_call(
        &self,
        token_in: &AccountId,
        amount_in: u128,
        token_out: &AccountId,
        min_amount_out: u128,
    ) -> ContractCall;

    fn add_liquidity_call(&self, token: &AccountId, amount: u128) -> ContractCall;

    fn remove_liquidity_call(&self, token: &AccountId, amount: u128) -> ContractCall;
}

#[derive(Debug, Clone)]
pub struct ContractHandle {
    node: NodeClient,
    abi: ContractAbi,
    address: AccountId,
}

pub fn load_contract(node: NodeClient, abi: ContractAbi, address: AccountId) -> ContractHandle {
    debug!(
        target: "chain::contract",
        contract = %address.short(),
        contract_hex = %address.to_hex(),
        name = ?abi.name,
        chain = %node.chain(),
        rpc = %node.endpoint(),
        "合约句柄已创建"
    );
    ContractHandle { node, abi, address }
}

impl ContractHandle {
    fn build(&self, message: &Message, args: &[CallArg<'_>]) -> ContractCall {
        ContractCall {
            dest: self.address.clone(),
            message: message.label.clone(),
            data: encode_call(message.selector, args),
            payable: message.payable,
        }
    }
}

#[async_trait]
impl ContractApi for ContractHandle {
    fn address(&self) -> &AccountId {
        &self.address
    }

    async fn query_swap_rate(
        &self,
        caller: &AccountId,
        token_in: &AccountId,
        token_out: &AccountId,
    ) -> Result<u128, ChainError> {
        let data = encode_call(
            self.abi.get_swap_rate.selector,
            &[CallArg::Account(token_in), CallArg::Account(token_out)],
        );
        let output = self.node.contracts_call(caller, &self.address, &data).await?;
        decode_u128_return(&output)
    }

    fn swap_call(
        &self,
        token_in: &AccountId,
        amount_in: u128,
        token_out: &AccountId,
        min_amount_out: u128,
    ) -> ContractCall {
        self.build(
            &self.abi.swap_tokens,
            &[
                CallArg::Account(token_in),
                CallArg::U128(amount_in),
                CallArg::Account(token_out),
                CallArg::U128(min_amount_out),
            ],
        )
    }

    fn add_liquidity_call(&self, token: &AccountId, amount: u128) -> ContractCall {
        self.build(
            &self.abi.add_liquidity,
            &[CallArg::Account(token), CallArg::U128(amount)],
        )
    }

    fn remove_liquidity_call(&self, token: &AccountId, amount: u128) -> ContractCall {
        self.build(
            &self.abi.remove_liquidity,
            &[CallArg::Account(token), CallArg::U128(amount)],
        )
    }
}
