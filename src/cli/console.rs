//! 交互式会话：逐行读取 stdin，每行即一次“点击”。动作严格串行执行。

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::engine::{AppContext, EngineError};

use super::runner::{print_plan, status_of};

const PROMPT: &str = "swapx> ";
const HELP: &str = "commands: swap <token_in> <amount_in> <token_out> [slippage%] | \
quote <token_in> <amount_in> <token_out> [slippage%] | add <token> <amount> | \
remove <token> <amount> | accounts | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Swap {
        token_in: String,
        amount_in: Decimal,
        token_out: String,
        slippage: Decimal,
    },
    Quote {
        token_in: String,
        amount_in: Decimal,
        token_out: String,
        slippage: Decimal,
    },
    Add {
        token: String,
        amount: Decimal,
    },
    Remove {
        token: String,
        amount: Decimal,
    },
    Accounts,
    Help,
    Quit,
    Empty,
}

/// 解析一行输入。错误文本直接作为状态行的 reason。
pub fn parse_line(line: &str) -> Result<ConsoleCommand, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = parts.split_first() else {
        return Ok(ConsoleCommand::Empty);
    };

    match (verb.to_ascii_lowercase().as_str(), args) {
        ("swap" | "quote", [token_in, amount_in, token_out, rest @ ..]) if rest.len() <= 1 => {
            let amount_in = parse_amount(amount_in)?;
            let slippage = match rest.first() {
                Some(raw) => Decimal::from_str(raw.trim_end_matches('%')).map_err(|_| {
                    EngineError::InvalidAmount(format!("slippage `{raw}` is not a number"))
                        .to_string()
                })?,
                None => Decimal::ONE,
            };
            let token_in = token_in.to_string();
            let token_out = token_out.to_string();
            Ok(if verb.eq_ignore_ascii_case("swap") {
                ConsoleCommand::Swap {
                    token_in,
                    amount_in,
                    token_out,
                    slippage,
                }
            } else {
                ConsoleCommand::Quote {
                    token_in,
                    amount_in,
                    token_out,
                    slippage,
                }
            })
        }
        ("add", [token, amount]) => Ok(ConsoleCommand::Add {
            token: token.to_string(),
            amount: parse_amount(amount)?,
        }),
        ("remove", [token, amount]) => Ok(ConsoleCommand::Remove {
            token: token.to_string(),
            amount: parse_amount(amount)?,
        }),
        ("accounts", []) => Ok(ConsoleCommand::Accounts),
        ("help" | "?", _) => Ok(ConsoleCommand::Help),
        ("quit" | "exit", []) => Ok(ConsoleCommand::Quit),
        _ => Err(format!("unrecognised command `{}`, try `help`", line.trim())),
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw)
        .map_err(|_| EngineError::InvalidAmount(format!("`{raw}` is not a number")).to_string())
}

pub async fn run_console(ctx: &AppContext) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut all_ok = true;

    stdout.write_all(format!("{HELP}\n").as_bytes()).await?;
    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                stdout.write_all(format!("Error: {err}\n").as_bytes()).await?;
                continue;
            }
        };
        debug!(target: "cli::console", ?command, "执行控制台命令");

        let (status, ok) = match command {
            ConsoleCommand::Empty => continue,
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => (HELP.to_string(), true),
            ConsoleCommand::Accounts => (super::runner::format_accounts(ctx), true),
            ConsoleCommand::Swap {
                token_in,
                amount_in,
                token_out,
                slippage,
            } => status_of(ctx.swap(&token_in, amount_in, &token_out, slippage).await),
            ConsoleCommand::Quote {
                token_in,
                amount_in,
                token_out,
                slippage,
            } => match ctx
                .prepare_swap(&token_in, amount_in, &token_out, slippage)
                .await
            {
                Ok(plan) => (print_plan(&plan), true),
                Err(err) => (format!("Error: {err}"), false),
            },
            ConsoleCommand::Add { token, amount } => {
                status_of(ctx.add_liquidity(&token, amount).await)
            }
            ConsoleCommand::Remove { token, amount } => {
                status_of(ctx.remove_liquidity(&token, amount).await)
            }
        };
        all_ok &= ok;
        stdout.write_all(format!("{status}\n").as_bytes()).await?;
    }
    stdout.flush().await?;
    Ok(all_ok)
}
