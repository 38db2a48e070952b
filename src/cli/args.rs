use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "swapx", version, about = "ink! AMM 合约的兑换与流动性客户端")]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径（默认查找 swapx.yaml 或 config/swapx.yaml）"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "ADDRESS",
        global = true,
        help = "签名账户地址，覆盖 wallet.account（默认钱包中的第一个账户）"
    )]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 报价、计算最低输出并提交兑换
    Swap(SwapArgs),
    /// 向资金池添加流动性
    #[command(name = "add-liquidity")]
    AddLiquidity(LiquidityArgs),
    /// 从资金池移除流动性
    #[command(name = "remove-liquidity")]
    RemoveLiquidity(LiquidityArgs),
    /// 仅报价与滑点计算，不提交交易
    Quote(SwapArgs),
    /// 列出钱包桥可见的账户
    Accounts,
    /// 交互式会话：每行一个动作，整个会话共用一次初始化
    Console,
    /// 初始化配置模版文件
    Init(InitCmd),
}

#[derive(Args, Debug, Clone)]
pub struct SwapArgs {
    #[arg(long, help = "输入代币：配置中的 symbol 或合约地址")]
    pub token_in: String,
    #[arg(long, help = "输入数量（人类可读单位，按代币精度换算）")]
    pub amount_in: Decimal,
    #[arg(long, help = "输出代币：配置中的 symbol 或合约地址")]
    pub token_out: String,
    #[arg(
        long,
        default_value = "1",
        help = "滑点容忍度百分比，取值 [0, 100)，默认 1"
    )]
    pub slippage: Decimal,
}

#[derive(Args, Debug, Clone)]
pub struct LiquidityArgs {
    #[arg(long, help = "代币：配置中的 symbol 或合约地址")]
    pub token: String,
    #[arg(long, help = "数量（人类可读单位，按代币精度换算）")]
    pub amount: Decimal,
}

#[derive(Args, Debug)]
pub struct InitCmd {
    #[arg(long, value_name = "DIR", help = "可选输出目录（默认当前目录）")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "若文件存在则覆盖")]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn swap_defaults_to_one_percent_slippage() {
        let cli = Cli::try_parse_from([
            "swapx",
            "swap",
            "--token-in",
            "DOT",
            "--amount-in",
            "1.5",
            "--token-out",
            "USDT",
        ])
        .expect("parse");
        match cli.command {
            Command::Swap(args) => {
                assert_eq!(args.slippage, Decimal::ONE);
                assert_eq!(args.amount_in, Decimal::from_str("1.5").expect("decimal"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn account_override_is_global() {
        let cli = Cli::try_parse_from([
            "swapx",
            "add-liquidity",
            "--token",
            "DOT",
            "--amount",
            "2",
            "--account",
            "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
        ])
        .expect("parse");
        assert!(cli.account.is_some());
        assert!(matches!(cli.command, Command::AddLiquidity(_)));
    }

    #[test]
    fn malformed_amount_is_a_parse_error() {
        let result = Cli::try_parse_from([
            "swapx",
            "remove-liquidity",
            "--token",
            "DOT",
            "--amount",
            "lots",
        ]);
        assert!(result.is_err());
    }
}
