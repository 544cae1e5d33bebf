//! Model validation.

use crate::error::{IslmError, Result};

use super::ModelParameters;

/// Validate a parameter set for a full IS-LM evaluation.
///
/// Checks:
/// - All parameters are finite
/// - Investment and money demand respond to the interest rate (`b`, `h` non-zero)
/// - The system determinant `b·k + h·(1−c)` is non-zero
pub fn validate_model(params: &ModelParameters) -> Result<()> {
    params.ensure_finite()?;
    params.checked_b()?;
    params.checked_h()?;
    params.checked_denominator()?;
    Ok(())
}

/// Validate a parameter set for the goods-market panel as well.
///
/// The Keynesian cross additionally divides by the leakage `1 − c`.
pub fn validate_goods_market(params: &ModelParameters) -> Result<()> {
    validate_model(params)?;
    params.checked_leakage()?;
    Ok(())
}

/// Validate a parameter set for every dashboard panel.
///
/// The money-market panel plots real balances from zero upwards, so the
/// baseline money supply must be non-negative.
pub fn validate_dashboard(params: &ModelParameters) -> Result<()> {
    validate_goods_market(params)?;
    if params.m0 < 0.0 {
        return Err(IslmError::InvalidParameter {
            param: "M0".to_string(),
            message: format!("real money supply {} is negative", params.m0),
        });
    }
    Ok(())
}
