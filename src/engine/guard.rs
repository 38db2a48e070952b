//! 滑点保护：由报价推导预期输出与最低可接受输出。

use primitive_types::U256;
use rust_decimal::Decimal;

use super::error::{EngineError, EngineResult};
use super::types::GuardedAmounts;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn validate_amount(amount: Decimal) -> EngineResult<()> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

/// 容忍度必须落在 [0, 100)。
pub fn validate_slippage(slippage_pct: Decimal) -> EngineResult<()> {
    if slippage_pct < Decimal::ZERO || slippage_pct >= ONE_HUNDRED {
        return Err(EngineError::InvalidSlippage(slippage_pct));
    }
    Ok(())
}

/// `amount_out = ⌊amount_in × rate / scale⌋`，`min = ⌊amount_out × (100 − pct) / 100⌋`。
///
/// 全部在链上最小单位上做整数运算，中间积放在 256 位里。任一结果取整为 0 都拒绝：
/// 最低输出为 0 的交易不受任何保护。
pub fn compute_bounds(
    amount_in: u128,
    rate: u128,
    slippage_pct: Decimal,
    scale: u128,
) -> EngineResult<GuardedAmounts> {
    validate_slippage(slippage_pct)?;
    if amount_in == 0 {
        return Err(EngineError::InvalidAmount(
            "amount must be positive, got 0".to_string(),
        ));
    }
    if scale == 0 {
        return Err(EngineError::QuoteUnavailable(
            "fixed-point scale must be positive, got 0".to_string(),
        ));
    }

    let gross = U256::from(amount_in)
        .checked_mul(U256::from(rate))
        .ok_or_else(|| out_of_range("expected output"))?;
    let amount_out = narrow(gross / U256::from(scale), "expected output")?;

    let (kept, whole) = retained_fraction(slippage_pct)?;
    let min_amount_out = narrow(
        U256::from(amount_out)
            .checked_mul(U256::from(kept))
            .ok_or_else(|| out_of_range("minimum output"))?
            / U256::from(whole),
        "minimum output",
    )?;

    if min_amount_out == 0 {
        return Err(EngineError::InvalidAmount(
            "expected output rounds to zero".to_string(),
        ));
    }

    Ok(GuardedAmounts {
        amount_out,
        min_amount_out,
    })
}

/// `(100 − pct) / 100` 表示为整数分子与分母。
fn retained_fraction(slippage_pct: Decimal) -> EngineResult<(u128, u128)> {
    let mantissa = u128::try_from(slippage_pct.mantissa())
        .map_err(|_| EngineError::InvalidSlippage(slippage_pct))?;
    let whole = 10u128
        .checked_pow(slippage_pct.scale())
        .and_then(|unit| unit.checked_mul(100))
        .ok_or(EngineError::InvalidSlippage(slippage_pct))?;
    let kept = whole
        .checked_sub(mantissa)
        .ok_or(EngineError::InvalidSlippage(slippage_pct))?;
    Ok((kept, whole))
}

fn narrow(value: U256, what: &str) -> EngineResult<u128> {
    if value.bits() > 128 {
        return Err(out_of_range(what));
    }
    Ok(value.low_u128())
}

fn out_of_range(what: &str) -> EngineError {
    EngineError::InvalidAmount(format!("{what} exceeds u128"))
}
