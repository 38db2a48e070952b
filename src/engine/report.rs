use super::error::EngineError;
use super::types::{ActionKind, TxOutcome};

const ERROR_PREFIX: &str = "Error: ";
const INIT_ERROR_PREFIX: &str = "Initialization Error: ";

/// 结果 → 状态栏文本。纯函数，每次调用恰好产出一行。
pub fn report(outcome: &TxOutcome, kind: ActionKind) -> String {
    match outcome {
        TxOutcome::Success(_) => kind.success_message().to_string(),
        TxOutcome::Failure(reason) => format!("{ERROR_PREFIX}{reason}"),
    }
}

pub fn report_init_error(err: &EngineError) -> String {
    format!("{INIT_ERROR_PREFIX}{err}")
}

impl From<EngineError> for TxOutcome {
    fn from(err: EngineError) -> Self {
        TxOutcome::Failure(err.to_string())
    }
}
