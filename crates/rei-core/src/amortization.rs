use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ReiError;
use crate::types::{Money, Percent, Rate};
use crate::ReiResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Derived fixed-rate loan terms. Immutable once computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Periodic rate as a decimal fraction (annual% / 100 / 12)
    pub monthly_rate: Rate,
    pub payment_count: u32,
    pub monthly_payment: Money,
}

impl LoanTerms {
    /// Derive the full payment schedule parameters for a fixed-rate loan.
    pub fn derive(principal: Money, annual_rate: Percent, term_years: u32) -> ReiResult<Self> {
        let payment = monthly_payment(principal, annual_rate, term_years)?;
        Ok(LoanTerms {
            principal,
            monthly_rate: annual_rate / dec!(100) / dec!(12),
            payment_count: term_years * MONTHS_PER_YEAR,
            monthly_payment: payment,
        })
    }

    /// Interest paid over the life of the loan.
    pub fn total_interest(&self) -> Money {
        total_interest(self.principal, self.monthly_payment, self.payment_count)
    }
}

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// `annual_rate` is in percentage points (6.5 = 6.5%). A zero rate is an
/// exact boundary case: the loan repays straight-line at principal / n.
pub fn monthly_payment(
    principal: Money,
    annual_rate: Percent,
    term_years: u32,
) -> ReiResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if term_years == 0 {
        return Err(ReiError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let payment_count = term_years * MONTHS_PER_YEAR;
    let n = Decimal::from(payment_count);
    let monthly_rate = annual_rate / dec!(100) / dec!(12);

    if monthly_rate.is_zero() {
        // Interest-free: straight-line repayment
        return Ok(principal / n);
    }

    let compound = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(payment_count))
        .ok_or_else(|| ReiError::ArithmeticOverflow {
            context: "(1 + r)^n compounding factor".into(),
        })?;

    let numerator = monthly_rate
        .checked_mul(compound)
        .and_then(|f| principal.checked_mul(f))
        .ok_or_else(|| ReiError::ArithmeticOverflow {
            context: "mortgage payment numerator".into(),
        })?;

    // compound > 1 whenever monthly_rate > 0, so the denominator is nonzero
    Ok(numerator / (compound - Decimal::ONE))
}

/// Total interest over the loan: payment * n - principal.
pub fn total_interest(principal: Money, monthly_payment: Money, payment_count: u32) -> Money {
    monthly_payment * Decimal::from(payment_count) - principal
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_reference_30y() {
        // $400k at 6.5% over 30 years: ~$2,528/mo
        let payment = monthly_payment(dec!(400000), dec!(6.5), 30).unwrap();
        assert!(
            payment > dec!(2525) && payment < dec!(2532),
            "payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = monthly_payment(dec!(360000), Decimal::ZERO, 30).unwrap();
        // $360k / 360 months = $1000/mo, exact
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_payment_non_decreasing_in_rate() {
        let low = monthly_payment(dec!(250000), dec!(4.0), 30).unwrap();
        let mid = monthly_payment(dec!(250000), dec!(5.5), 30).unwrap();
        let high = monthly_payment(dec!(250000), dec!(7.0), 30).unwrap();
        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_payment_non_increasing_in_term() {
        let short = monthly_payment(dec!(250000), dec!(6.0), 15).unwrap();
        let long = monthly_payment(dec!(250000), dec!(6.0), 30).unwrap();
        assert!(short > long);
    }

    #[test]
    fn test_total_interest_identity() {
        let terms = LoanTerms::derive(dec!(400000), dec!(6.5), 30).unwrap();
        let total_paid = terms.monthly_payment * Decimal::from(terms.payment_count);
        assert_eq!(terms.total_interest() + terms.principal, total_paid);
    }

    #[test]
    fn test_invalid_principal() {
        let result = monthly_payment(Decimal::ZERO, dec!(6.5), 30);
        match result.unwrap_err() {
            ReiError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_term() {
        assert!(monthly_payment(dec!(100000), dec!(6.5), 0).is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = monthly_payment(dec!(100000), dec!(-1.0), 30);
        match result.unwrap_err() {
            ReiError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_extreme_rate_overflows() {
        // 100,000% annual over 50 years blows past Decimal range
        let result = monthly_payment(dec!(100000), dec!(100000), 50);
        assert!(matches!(
            result.unwrap_err(),
            ReiError::ArithmeticOverflow { .. }
        ));
    }

    #[test]
    fn test_derive_packages_terms() {
        let terms = LoanTerms::derive(dec!(400000), dec!(6.5), 30).unwrap();
        assert_eq!(terms.principal, dec!(400000));
        assert_eq!(terms.payment_count, 360);
        assert_eq!(terms.monthly_rate, dec!(6.5) / dec!(100) / dec!(12));
    }
}
