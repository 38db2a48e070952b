use anyhow::Result;
use tracing::{debug, error, info};

use crate::chain::AccountId;
use crate::cli::args::{Cli, Command, LiquidityArgs, SwapArgs};
use crate::cli::console::run_console;
use crate::cli::context::init_configs;
use crate::config::SwapxConfig;
use crate::engine::{
    ActionReport, AppContext, EngineError, SwapPlan, format_units, report_init_error,
};
use crate::monitoring::init_prometheus;

/// 执行子命令。返回值表示本次动作是否成功，供进程退出码使用。
pub async fn run(cli: Cli, config: SwapxConfig) -> Result<bool> {
    let command = match cli.command {
        Command::Init(args) => {
            init_configs(args)?;
            return Ok(true);
        }
        command => command,
    };

    let ctx = match start(&config, cli.account.as_deref()).await {
        Ok(ctx) => ctx,
        Err(err) => {
            error!(target: "cli::runner", kind = err.label(), "初始化失败: {err}");
            println!("{}", report_init_error(&err));
            return Ok(false);
        }
    };
    info!(
        target: "cli::runner",
        account = %ctx.account(),
        "上下文就绪"
    );

    let ok = match command {
        Command::Swap(args) => emit(swap(&ctx, &args).await),
        Command::AddLiquidity(LiquidityArgs { token, amount }) => {
            emit(status_of(ctx.add_liquidity(&token, amount).await))
        }
        Command::RemoveLiquidity(LiquidityArgs { token, amount }) => {
            emit(status_of(ctx.remove_liquidity(&token, amount).await))
        }
        Command::Quote(args) => emit(
            match ctx
                .prepare_swap(&args.token_in, args.amount_in, &args.token_out, args.slippage)
                .await
            {
                Ok(plan) => {
                    debug!(
                        target: "cli::runner",
                        amount_in_units = %plan.amount_in_units,
                        action = %plan.action.kind(),
                        "报价完成，未提交"
                    );
                    (print_plan(&plan), true)
                }
                Err(err) => (format!("Error: {err}"), false),
            },
        ),
        Command::Accounts => emit((format_accounts(&ctx), true)),
        Command::Console => run_console(&ctx).await?,
        Command::Init(_) => true,
    };
    Ok(ok)
}

/// 启动阶段：exporter 与上下文。任何失败都归入初始化错误。
async fn start(config: &SwapxConfig, account: Option<&str>) -> Result<AppContext, EngineError> {
    init_prometheus(&config.prometheus)
        .map_err(|err| EngineError::InvalidConfig(format!("prometheus: {err:#}")))?;
    AppContext::initialize(config, account).await
}

async fn swap(ctx: &AppContext, args: &SwapArgs) -> (String, bool) {
    status_of(
        ctx.swap(&args.token_in, args.amount_in, &args.token_out, args.slippage)
            .await,
    )
}

fn emit((status, ok): (String, bool)) -> bool {
    println!("{status}");
    ok
}

pub(crate) fn status_of(report: ActionReport) -> (String, bool) {
    let ok = report.is_success();
    debug!(target: "cli::runner", action = %report.kind, ok, "动作结束");
    (report.status, ok)
}

pub(crate) fn print_plan(plan: &SwapPlan) -> String {
    let pair = &plan.request.pair;
    let out_decimals = pair.token_out.decimals;
    let expected = format_units(plan.bounds.amount_out, out_decimals);
    let minimum = format_units(plan.bounds.min_amount_out, out_decimals);
    format!(
        "Quote: {} {} -> {} {} (minimum {} at {}% slippage, rate {})",
        plan.request.amount_in,
        pair.token_in,
        expected,
        pair.token_out,
        minimum,
        plan.request.slippage_pct,
        plan.quote.rate
    )
}

pub(crate) fn format_accounts(ctx: &AppContext) -> String {
    ctx.accounts()
        .iter()
        .map(|account| {
            let selected = account
                .address
                .parse::<AccountId>()
                .is_ok_and(|id| id == *ctx.account());
            let marker = if selected { "*" } else { " " };
            match &account.name {
                Some(name) => format!("{marker} {} ({name})", account.address),
                None => format!("{marker} {}", account.address),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn exporter_failure_is_an_initialization_error() {
        let mut config = SwapxConfig::default();
        config.prometheus.enable = true;
        config.prometheus.listen = "not-an-address".to_string();

        let err = start(&config, None).await.err().expect("startup error");
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        let status = report_init_error(&err);
        assert!(status.starts_with("Initialization Error: invalid configuration: prometheus:"));
        assert!(status.contains("not-an-address"));
    }
}
