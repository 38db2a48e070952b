use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::chain::{AccountId, ContractApi};
use crate::monitoring::events;

use super::error::{EngineError, EngineResult};
use super::types::{Quote, TradingPair};

/// 报价解析器：对合约做一次只读 dry-run，不缓存、不重试。
#[derive(Clone)]
pub struct QuoteResolver {
    contract: Arc<dyn ContractApi>,
}

impl QuoteResolver {
    pub fn new(contract: Arc<dyn ContractApi>) -> Self {
        Self { contract }
    }

    pub async fn get_rate(&self, pair: &TradingPair, as_account: &AccountId) -> EngineResult<Quote> {
        let started = Instant::now();
        let result = self
            .contract
            .query_swap_rate(as_account, &pair.token_in.address, &pair.token_out.address)
            .await;
        let elapsed = started.elapsed();

        let rate = match result {
            Ok(rate) => rate,
            Err(err) => {
                warn!(
                    target: "engine::quote",
                    pair = %pair,
                    error = %err,
                    "报价查询失败，放弃本次操作"
                );
                events::quote_failed(pair, elapsed);
                return Err(EngineError::QuoteUnavailable(err.to_string()));
            }
        };

        if rate == 0 {
            warn!(target: "engine::quote", pair = %pair, "合约返回零汇率");
            events::quote_failed(pair, elapsed);
            return Err(EngineError::QuoteUnavailable(format!(
                "no rate for pair {pair}"
            )));
        }

        debug!(
            target: "engine::quote",
            pair = %pair,
            rate,
            elapsed_ms = elapsed.as_millis() as u64,
            "报价获取成功"
        );
        events::quote_resolved(pair, rate, elapsed);
        Ok(Quote { rate })
    }
}
