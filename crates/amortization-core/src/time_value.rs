use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Error for an intermediate result that no longer fits in a Decimal.
pub(crate) fn out_of_range(field: &str, what: &str) -> AmortizationError {
    AmortizationError::InvalidParameter {
        field: field.into(),
        reason: format!("{what} exceeds decimal range"),
    }
}

/// Compound growth factor (1 + r)^n, rejecting rates whose factor
/// overflows the 96-bit mantissa.
fn growth_factor(rate: Rate, nper: u32) -> AmortizationResult<Decimal> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powi(i64::from(nper)))
        .ok_or_else(|| out_of_range("rate", &format!("Compound factor over {nper} periods")))
}

/// Future Value
pub fn fv(rate: Rate, nper: u32, pmt: Money, present_value: Money) -> AmortizationResult<Money> {
    let overflow = || out_of_range("present_value", "Future value");

    if rate.is_zero() {
        let paid = pmt.checked_mul(Decimal::from(nper)).ok_or_else(overflow)?;
        return Ok(-present_value.checked_add(paid).ok_or_else(overflow)?);
    }

    let factor = growth_factor(rate, nper)?;
    let annuity_factor = (factor - Decimal::ONE).checked_div(rate).ok_or_else(overflow)?;

    let grown = present_value.checked_mul(factor).ok_or_else(overflow)?;
    let accrued = pmt.checked_mul(annuity_factor).ok_or_else(overflow)?;
    Ok(-grown.checked_add(accrued).ok_or_else(overflow)?)
}

/// Payment (PMT)
///
/// Sign convention follows the spreadsheet function: a loan received
/// (positive cash in) is passed as a negative `present_value` and yields a
/// positive payment.
///
/// Evaluated as `-(pv + fv/(1+r)^n) * r / (1 - (1+r)^-n)` so that high rates
/// over long terms never multiply the principal by the compound factor.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> AmortizationResult<Money> {
    if nper == 0 {
        return Err(AmortizationError::InvalidParameter {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let overflow = || out_of_range("present_value", "Level payment");

    if rate.is_zero() {
        let total = present_value.checked_add(future_value).ok_or_else(overflow)?;
        return Ok(-total / Decimal::from(nper));
    }

    let factor = growth_factor(rate, nper)?;
    let discount = Decimal::ONE.checked_div(factor).ok_or_else(overflow)?;
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let discounted_fv = future_value.checked_div(factor).ok_or_else(overflow)?;
    let balance = present_value.checked_add(discounted_fv).ok_or_else(overflow)?;
    let payment = balance
        .checked_mul(rate)
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(overflow)?;
    Ok(-payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pmt_standard_mortgage() {
        // 500k at 7.5% p.a. over 20 years, monthly
        let result = pmt(dec!(0.00625), 240, dec!(-500000), Decimal::ZERO).unwrap();
        assert!((result - dec!(4027.97)).abs() < dec!(0.01));
    }

    #[test]
    fn test_pmt_one_year() {
        // 12k at 10% p.a. over 12 months ≈ 1054.99
        let result = pmt(dec!(0.10) / dec!(12), 12, dec!(-12000), Decimal::ZERO).unwrap();
        assert!((result - dec!(1054.99)).abs() < dec!(0.01));
    }

    #[test]
    fn test_pmt_zero_rate() {
        let result = pmt(Decimal::ZERO, 10, dec!(-1000), Decimal::ZERO).unwrap();
        assert_eq!(result, dec!(100));
    }

    #[test]
    fn test_pmt_zero_periods() {
        let err = pmt(dec!(0.01), 0, dec!(-1000), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidParameter { .. }));
    }

    #[test]
    fn test_pmt_fully_amortizes() {
        // Paying the level payment for nper periods leaves nothing owing.
        let payment = pmt(dec!(0.005), 360, dec!(-250000), Decimal::ZERO).unwrap();
        let residual = fv(dec!(0.005), 360, payment, dec!(-250000)).unwrap();
        assert!(residual.abs() < dec!(0.000001));
    }

    #[test]
    fn test_fv_zero_rate() {
        let result = fv(Decimal::ZERO, 5, dec!(-100), dec!(-1000)).unwrap();
        assert_eq!(result, dec!(1500));
    }

    #[test]
    fn test_pmt_overflowing_rate() {
        let err = pmt(dec!(100), 360, dec!(-1000), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidParameter { .. }));
    }

    #[test]
    fn test_pmt_high_rate_long_term() {
        // 200% p.a. over 30 years: (1+r)^n is ~1e24, so pv * factor would
        // not fit. The payment is just above one month's interest.
        let rate = dec!(200) / dec!(12) / dec!(100);
        let result = pmt(rate, 360, dec!(-500000), Decimal::ZERO).unwrap();
        let interest_only = dec!(500000) * rate;
        assert!(result > interest_only);
        assert!(result - interest_only < dec!(0.000001));
    }

    #[test]
    fn test_pmt_principal_near_max() {
        let result = pmt(dec!(0.00625), 360, -Decimal::MAX, Decimal::ZERO).unwrap();
        assert!(result > Decimal::ZERO);
        assert!(result < Decimal::MAX);
    }

    #[test]
    fn test_fv_overflow_is_error() {
        let rate = dec!(200) / dec!(12) / dec!(100);
        let err = fv(rate, 360, Decimal::ZERO, dec!(-500000)).unwrap_err();
        match err {
            AmortizationError::InvalidParameter { field, .. } => assert_eq!(field, "present_value"),
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_pmt_zero_rate_overflow_is_error() {
        let err = pmt(Decimal::ZERO, 12, -Decimal::MAX, -Decimal::MAX).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidParameter { .. }));
    }
}
