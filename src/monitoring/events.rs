use std::time::Duration;

use metrics::{counter, histogram};
use tracing::{info, warn};

use crate::engine::{ActionKind, TradingPair, TxOutcome};

use super::metrics::prometheus_enabled;

fn latency_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000.0
}

pub fn quote_resolved(pair: &TradingPair, rate: u128, elapsed: Duration) {
    let latency_ms = latency_ms(elapsed);
    info!(
        target: "monitoring::quote",
        event = "resolved",
        token_in = %pair.token_in,
        token_out = %pair.token_out,
        rate = %rate,
        latency_ms,
        "quote resolved"
    );

    if prometheus_enabled() {
        counter!("swapx_quote_total", "result" => "success").increment(1);
        histogram!("swapx_quote_latency_ms", "result" => "success").record(latency_ms);
    }
}

pub fn quote_failed(pair: &TradingPair, elapsed: Duration) {
    let latency_ms = latency_ms(elapsed);
    warn!(
        target: "monitoring::quote",
        event = "failed",
        token_in = %pair.token_in,
        token_out = %pair.token_out,
        latency_ms,
        "quote unavailable"
    );

    if prometheus_enabled() {
        counter!("swapx_quote_total", "result" => "unavailable").increment(1);
        histogram!("swapx_quote_latency_ms", "result" => "unavailable").record(latency_ms);
    }
}

pub fn submission_succeeded(kind: ActionKind, elapsed: Duration) {
    if prometheus_enabled() {
        counter!(
            "swapx_submission_total",
            "action" => kind.as_str(),
            "result" => "success"
        )
        .increment(1);
        histogram!("swapx_submission_latency_ms", "action" => kind.as_str())
            .record(latency_ms(elapsed));
    }
}

pub fn submission_rejected(kind: ActionKind, elapsed: Duration) {
    if prometheus_enabled() {
        counter!(
            "swapx_submission_total",
            "action" => kind.as_str(),
            "result" => "rejected"
        )
        .increment(1);
        histogram!("swapx_submission_latency_ms", "action" => kind.as_str())
            .record(latency_ms(elapsed));
    }
}

pub fn action_finished(kind: ActionKind, outcome: &TxOutcome) {
    match outcome {
        TxOutcome::Success(receipt) => info!(
            target: "monitoring::action",
            event = "finished",
            action = kind.as_str(),
            status = "success",
            tx_hash = %receipt.tx_hash,
            "action finished"
        ),
        TxOutcome::Failure(reason) => warn!(
            target: "monitoring::action",
            event = "finished",
            action = kind.as_str(),
            status = "failure",
            reason = %reason,
            "action failed"
        ),
    }

    if prometheus_enabled() {
        let result = if outcome.is_success() {
            "success"
        } else {
            "failure"
        };
        counter!(
            "swapx_action_total",
            "action" => kind.as_str(),
            "result" => result
        )
        .increment(1);
    }
}
