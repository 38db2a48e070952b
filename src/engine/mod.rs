//! 兑换报价与执行编排：报价解析 → 滑点保护 → 交易提交 → 结果上报。

mod context;
mod error;
mod guard;
mod quote;
mod report;
mod submit;
mod types;

pub use context::{ActionReport, AppContext, SwapPlan};
pub use error::EngineError;
pub use report::report_init_error;
pub use types::{ActionKind, GasLimit, TradingPair, TxOutcome, format_units};
