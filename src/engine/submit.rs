use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::chain::{AccountId, ContractApi, ContractCall};
use crate::monitoring::events;
use crate::wallet::{SignRequest, WalletProvider};

use super::error::{EngineError, EngineResult};
use super::types::{ExecParams, GuardedAction, TxReceipt};

/// 交易提交器。每次调用只发起一次提交，失败原样上报，绝不自动重试。
#[derive(Clone)]
pub struct TransactionSubmitter {
    contract: Arc<dyn ContractApi>,
    wallet: Arc<dyn WalletProvider>,
    signer: AccountId,
}

impl TransactionSubmitter {
    pub fn new(
        contract: Arc<dyn ContractApi>,
        wallet: Arc<dyn WalletProvider>,
        signer: AccountId,
    ) -> Self {
        Self {
            contract,
            wallet,
            signer,
        }
    }

    pub fn build_call(&self, action: &GuardedAction) -> ContractCall {
        match action {
            GuardedAction::Swap {
                token_in,
                amount_in,
                token_out,
                min_amount_out,
            } => self
                .contract
                .swap_call(token_in, *amount_in, token_out, *min_amount_out),
            GuardedAction::AddLiquidity { token, amount } => {
                self.contract.add_liquidity_call(token, *amount)
            }
            GuardedAction::RemoveLiquidity { token, amount } => {
                self.contract.remove_liquidity_call(token, *amount)
            }
        }
    }

    pub async fn submit(
        &self,
        action: &GuardedAction,
        exec: &ExecParams,
    ) -> EngineResult<TxReceipt> {
        let kind = action.kind();
        let call = self.build_call(action);
        let request = SignRequest {
            signer: self.signer.address().to_string(),
            call,
            value: exec.value_attached,
            gas_limit: exec.gas_limit,
        };

        info!(
            target: "engine::submit",
            action = %kind,
            message = %request.call.message,
            signer = %self.signer.short(),
            value = %exec.value_attached,
            gas_limit = %exec.gas_limit,
            "提交交易，等待钱包确认"
        );

        let started = Instant::now();
        let result = self.wallet.sign_and_send(&request).await;
        let elapsed = started.elapsed();

        match result {
            Ok(receipt) => {
                info!(
                    target: "engine::submit",
                    action = %kind,
                    tx_hash = %receipt.tx_hash,
                    block_hash = ?receipt.block_hash,
                    status = %receipt.status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "交易已上链"
                );
                events::submission_succeeded(kind, elapsed);
                Ok(receipt)
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(
                    target: "engine::submit",
                    action = %kind,
                    transport = err.is_transport(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "交易提交被拒绝: {reason}"
                );
                events::submission_rejected(kind, elapsed);
                Err(EngineError::SubmissionRejected(reason))
            }
        }
    }
}
