//! Quote engine
//!
//! A quote is advisory: it is shown to the user before the deposit and
//! recorded once on the bridge request, never re-validated afterwards.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Slippage applied to every quote, in basis points (50 = 0.50%)
pub const SLIPPAGE_BPS: u32 = 50;

/// Bridge fee applied to every quote, in percent (0.1%)
pub const FEE_PERCENT: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Decimal places of the derived amounts
pub const PRECISION: u32 = 6;

/// Human readable settlement estimate
pub const ESTIMATED_TIME: &str = "~30 minutes";

/// Errors of the quote engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("Amount is required")]
    Missing,

    #[error("Invalid amount")]
    Invalid,
}

/// A fee and slippage adjusted quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// The amount as requested by the user
    pub input_amount: String,

    /// The amount the user receives on the destination chain
    pub output_amount: String,

    /// Slippage policy in basis points
    pub slippage_bps: u32,

    /// Fee policy in percent
    #[serde(with = "rust_decimal::serde::float")]
    pub fee_percent: Decimal,

    /// Fee deducted from the input
    pub fee_amount: String,

    /// Slippage deducted from the input
    pub slippage_amount: String,

    /// Settlement estimate
    pub estimated_time: String,
}

impl Quote {
    /// Compute the quote for a decimal amount string
    pub fn new(amount: &str) -> Result<Self, QuoteError> {
        let (slippage, fee, output) = match parse_amount(amount)? {
            Amount::Exact(value) => exact(value)?,
            Amount::Approximate(value) => approximate(value)?,
        };

        Ok(Self {
            input_amount: amount.trim().to_string(),
            output_amount: output,
            slippage_bps: SLIPPAGE_BPS,
            fee_percent: FEE_PERCENT,
            fee_amount: fee,
            slippage_amount: slippage,
            estimated_time: ESTIMATED_TIME.to_string(),
        })
    }
}

/// A parsed, strictly positive amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// Representable as a [`Decimal`]
    Exact(Decimal),

    /// Beyond the scale or range of [`Decimal`]
    Approximate(f64),
}

/// Parse a strictly positive amount
///
/// Plain decimals (`1.5`) and scientific notation (`1.5e-3`) are accepted.
/// Amounts [`Decimal`] cannot hold, such as `1e-30` or `1e30`, fall back
/// to `f64`.
pub fn parse_amount(amount: &str) -> Result<Amount, QuoteError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(QuoteError::Missing);
    }

    let decimal = Decimal::from_str(amount).or_else(|_| Decimal::from_scientific(amount));
    if let Ok(value) = decimal {
        if value > Decimal::ZERO {
            return Ok(Amount::Exact(value));
        }
    }

    // Out of scale values may round to zero above, so positivity is
    // decided on the float
    let value = amount.parse::<f64>().map_err(|_| QuoteError::Invalid)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(QuoteError::Invalid);
    }

    Ok(Amount::Approximate(value))
}

/// Slippage, fee and output in exact decimal arithmetic
fn exact(value: Decimal) -> Result<(String, String, String), QuoteError> {
    let slippage_rate = Decimal::from(SLIPPAGE_BPS) / Decimal::from(10_000);
    let fee_rate = FEE_PERCENT / Decimal::ONE_HUNDRED;
    let slippage = value
        .checked_mul(slippage_rate)
        .ok_or(QuoteError::Invalid)?;
    let fee = value.checked_mul(fee_rate).ok_or(QuoteError::Invalid)?;
    let output = value
        .checked_sub(slippage)
        .and_then(|v| v.checked_sub(fee))
        .ok_or(QuoteError::Invalid)?;

    Ok((to_fixed(slippage), to_fixed(fee), to_fixed(output)))
}

/// Slippage, fee and output in floating point
fn approximate(value: f64) -> Result<(String, String, String), QuoteError> {
    let fee_percent = f64::try_from(FEE_PERCENT).map_err(|_| QuoteError::Invalid)?;
    let slippage = value * (f64::from(SLIPPAGE_BPS) / 10_000.0);
    let fee = value * (fee_percent / 100.0);
    let output = value - slippage - fee;

    let fixed = |v: f64| format!("{:.*}", PRECISION as usize, v);
    Ok((fixed(slippage), fixed(fee), fixed(output)))
}

/// Format with exactly [`PRECISION`] decimal places
fn to_fixed(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(PRECISION, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", PRECISION as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_quote_one_eth() -> Result<()> {
        let quote = Quote::new("1.0")?;
        assert_eq!(quote.input_amount, "1.0");
        assert_eq!(quote.output_amount, "0.994000");
        assert_eq!(quote.slippage_amount, "0.005000");
        assert_eq!(quote.fee_amount, "0.001000");
        assert_eq!(quote.slippage_bps, 50);
        assert_eq!(quote.estimated_time, "~30 minutes");
        Ok(())
    }

    #[test]
    fn test_output_matches_policy() -> Result<()> {
        for amount in ["0.000001", "0.0123", "0.5", "2", "3.1415926", "99.99", "12345.678901"] {
            let quote = Quote::new(amount)?;
            let a: f64 = amount.parse()?;
            let expected = a - a * 0.005 - a * 0.001;
            let output: f64 = quote.output_amount.parse()?;
            assert!(
                (output - expected).abs() <= 1e-6,
                "{amount}: {output} != {expected}"
            );
            assert_eq!(quote.output_amount.split('.').nth(1).map(str::len), Some(6));
        }
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        assert_eq!(Quote::new(""), Err(QuoteError::Missing));
        assert_eq!(Quote::new("   "), Err(QuoteError::Missing));
        assert_eq!(Quote::new("0"), Err(QuoteError::Invalid));
        assert_eq!(Quote::new("0.0"), Err(QuoteError::Invalid));
        assert_eq!(Quote::new("-1"), Err(QuoteError::Invalid));
        assert_eq!(Quote::new("abc"), Err(QuoteError::Invalid));
        assert_eq!(Quote::new("NaN"), Err(QuoteError::Invalid));
        assert_eq!(Quote::new("inf"), Err(QuoteError::Invalid));
    }

    #[test]
    fn test_scientific_notation() -> Result<()> {
        assert_eq!(Quote::new("1e1")?.output_amount, "9.940000");
        Ok(())
    }

    #[test]
    fn test_input_is_trimmed() -> Result<()> {
        let quote = Quote::new(" 1.0 ")?;
        assert_eq!(quote.input_amount, "1.0");
        assert_eq!(quote.output_amount, "0.994000");
        Ok(())
    }

    #[test]
    fn test_tiny_amounts() -> Result<()> {
        for amount in ["1e-30", "0.00000000000000000000000000001"] {
            assert!(matches!(parse_amount(amount)?, Amount::Approximate(_)));
            let quote = Quote::new(amount)?;
            assert_eq!(quote.output_amount, "0.000000");
            assert_eq!(quote.fee_amount, "0.000000");
            assert_eq!(quote.slippage_amount, "0.000000");
        }
        Ok(())
    }

    #[test]
    fn test_huge_amounts() -> Result<()> {
        for amount in ["1e30", "1000000000000000000000000000000"] {
            let quote = Quote::new(amount)?;
            let output: f64 = quote.output_amount.parse()?;
            assert!((output / 9.94e29 - 1.0).abs() < 1e-12, "{amount}: {output}");
            assert_eq!(quote.output_amount.split('.').nth(1).map(str::len), Some(6));
        }
        assert_eq!(Quote::new("1e400"), Err(QuoteError::Invalid));
        assert_eq!(Quote::new("-1e30"), Err(QuoteError::Invalid));
        Ok(())
    }

    #[test]
    fn test_fee_percent_is_a_number() -> Result<()> {
        let json = serde_json::to_value(Quote::new("1")?)?;
        assert_eq!(json["feePercent"], serde_json::json!(0.1));
        assert_eq!(json["outputAmount"], "0.994000");
        Ok(())
    }
}
