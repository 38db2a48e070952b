use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use metrics::{Unit, describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;
use tracing::info;

use crate::config::PrometheusConfig;

static EXPORTER: OnceCell<SocketAddr> = OnceCell::new();
static PROMETHEUS_ENABLED: AtomicBool = AtomicBool::new(false);

/// 按配置启动 Prometheus HTTP exporter；未启用时什么都不做。重复调用只安装一次。
pub fn init_prometheus(config: &PrometheusConfig) -> Result<()> {
    if !config.enable {
        return Ok(());
    }

    let addr = EXPORTER.get_or_try_init(|| -> Result<SocketAddr> {
        let addr: SocketAddr = config
            .listen
            .parse()
            .with_context(|| format!("invalid prometheus listen address: {}", config.listen))?;
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install prometheus exporter")?;
        describe();
        PROMETHEUS_ENABLED.store(true, Ordering::Relaxed);
        Ok(addr)
    })?;

    info!(target: "monitoring::metrics", listen = %addr, "Prometheus exporter 已启动");
    Ok(())
}

pub fn prometheus_enabled() -> bool {
    PROMETHEUS_ENABLED.load(Ordering::Relaxed)
}

fn describe() {
    describe_counter!("swapx_quote_total", "get_swap_rate dry-runs by result");
    describe_histogram!(
        "swapx_quote_latency_ms",
        Unit::Milliseconds,
        "get_swap_rate round-trip latency"
    );
    describe_counter!(
        "swapx_submission_total",
        "wallet submissions by action and result"
    );
    describe_histogram!(
        "swapx_submission_latency_ms",
        Unit::Milliseconds,
        "sign, broadcast and inclusion latency"
    );
    describe_counter!("swapx_action_total", "user actions by outcome");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_exporter_is_a_no_op() {
        let config = PrometheusConfig {
            enable: false,
            listen: "not-an-address".to_string(),
        };
        init_prometheus(&config).expect("disabled");
        assert!(!prometheus_enabled());
    }
}
