use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ReiError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::ReiResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a multi-year hold projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub loan_term_years: u32,
    /// First-year annual cash flow, held constant across the projection
    pub annual_cash_flow: Money,
    /// Annual appreciation in percentage points (3 = 3%)
    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate_percent: Percent,
    #[serde(default = "default_projection_years")]
    pub years: u32,
}

fn default_appreciation_rate() -> Percent {
    dec!(3)
}

fn default_projection_years() -> u32 {
    10
}

/// Cumulative position at the end of one projection year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,
    /// Appreciated value, rounded to whole currency units
    pub projected_property_value: Money,
    pub cumulative_equity: Money,
    pub cumulative_cash_flow: Money,
    pub cumulative_roi_percent: Percent,
}

/// Full projection output, one entry per year in ascending order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutput {
    pub years: Vec<YearProjection>,
    pub final_equity: Money,
    pub final_cash_flow: Money,
    pub final_roi_percent: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project property value, equity, cash flow, and ROI over a holding period.
///
/// Principal paydown is a straight-line approximation,
/// (loan_amount / loan_term_years) per year, not a true amortization walk.
/// It is not clamped when the projection runs past the loan term; replacing
/// it with per-period amortization would change every projected equity
/// figure and is out of scope.
pub fn project(input: &ProjectionInput) -> ReiResult<ComputationOutput<ProjectionOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let growth = Decimal::ONE + input.appreciation_rate_percent / dec!(100);
    let annual_principal = input.loan_amount / Decimal::from(input.loan_term_years);

    let mut years = Vec::with_capacity(input.years as usize);
    let mut appreciated = input.purchase_price;

    for year in 1..=input.years {
        appreciated = appreciated.checked_mul(growth).ok_or_else(|| {
            ReiError::ArithmeticOverflow {
                context: format!("property value appreciation at year {year}"),
            }
        })?;
        let projected_property_value =
            appreciated.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let principal_paid = annual_principal * Decimal::from(year);
        let appreciation_gain = projected_property_value - input.purchase_price;
        let cumulative_equity = input.down_payment + principal_paid + appreciation_gain;

        let cumulative_cash_flow = input.annual_cash_flow * Decimal::from(year);

        let total_return = (cumulative_equity - input.down_payment) + cumulative_cash_flow;
        let cumulative_roi_percent = total_return / input.down_payment * dec!(100);

        years.push(YearProjection {
            year,
            projected_property_value,
            cumulative_equity,
            cumulative_cash_flow,
            cumulative_roi_percent,
        });
    }

    if input.years > input.loan_term_years {
        warnings.push(format!(
            "Projection horizon ({}y) exceeds loan term ({}y); straight-line principal paydown \
             continues past payoff",
            input.years, input.loan_term_years
        ));
    }
    if input.annual_cash_flow < Decimal::ZERO {
        warnings.push("Negative annual cash flow compounds losses across the projection".into());
    }

    // years is non-empty: input.years >= 1 was validated
    let (final_equity, final_cash_flow, final_roi_percent) = {
        let last = &years[years.len() - 1];
        (
            last.cumulative_equity,
            last.cumulative_cash_flow,
            last.cumulative_roi_percent,
        )
    };
    let output = ProjectionOutput {
        years,
        final_equity,
        final_cash_flow,
        final_roi_percent,
    };

    Ok(with_metadata(
        "Multi-Year Equity and ROI Projection (straight-line paydown)",
        input,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &ProjectionInput) -> ReiResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    if input.down_payment <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must be positive; ROI is undefined without cash invested".into(),
        });
    }
    if input.loan_amount < Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }
    if input.loan_term_years == 0 {
        return Err(ReiError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }
    if input.years == 0 {
        return Err(ReiError::InvalidInput {
            field: "years".into(),
            reason: "Projection must cover at least 1 year".into(),
        });
    }
    if input.appreciation_rate_percent <= dec!(-100) {
        return Err(ReiError::InvalidInput {
            field: "appreciation_rate_percent".into(),
            reason: "Appreciation rate must be greater than -100%".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_input() -> ProjectionInput {
        ProjectionInput {
            purchase_price: dec!(500000),
            down_payment: dec!(100000),
            loan_amount: dec!(400000),
            loan_term_years: 30,
            annual_cash_flow: dec!(3264),
            appreciation_rate_percent: dec!(3),
            years: 10,
        }
    }

    #[test]
    fn test_ten_year_appreciation_reference() {
        let result = project(&sample_input()).unwrap();
        let out = &result.result;

        assert_eq!(out.years.len(), 10);
        // 500000 * 1.03^10 = 671,958.19 => 671,958 rounded
        assert_eq!(out.years[9].projected_property_value, dec!(671958));
    }

    #[test]
    fn test_zero_appreciation_holds_value() {
        let mut input = sample_input();
        input.appreciation_rate_percent = Decimal::ZERO;
        let result = project(&input).unwrap();

        for year in &result.result.years {
            assert_eq!(year.projected_property_value, dec!(500000));
        }
    }

    #[test]
    fn test_year_one_decomposition() {
        let result = project(&sample_input()).unwrap();
        let y1 = &result.result.years[0];

        // Value: 500000 * 1.03 = 515000
        assert_eq!(y1.projected_property_value, dec!(515000));
        // Principal paid: 400000 / 30 = 13,333.33
        // Equity: 100000 + 13333.33 + 15000 = 128,333.33
        assert!(
            y1.cumulative_equity > dec!(128333) && y1.cumulative_equity < dec!(128334),
            "equity {} outside expected range",
            y1.cumulative_equity
        );
        assert_eq!(y1.cumulative_cash_flow, dec!(3264));
    }

    #[test]
    fn test_sequence_is_monotone_in_year() {
        let result = project(&sample_input()).unwrap();
        let years = &result.result.years;

        for pair in years.windows(2) {
            assert_eq!(pair[1].year, pair[0].year + 1);
            // Positive appreciation and cash flow: everything rises
            assert!(pair[1].projected_property_value > pair[0].projected_property_value);
            assert!(pair[1].cumulative_equity > pair[0].cumulative_equity);
            assert!(pair[1].cumulative_roi_percent > pair[0].cumulative_roi_percent);
        }
    }

    #[test]
    fn test_roi_formula() {
        let result = project(&sample_input()).unwrap();
        let y1 = &result.result.years[0];

        let total_return = (y1.cumulative_equity - dec!(100000)) + y1.cumulative_cash_flow;
        let expected = total_return / dec!(100000) * dec!(100);
        assert_eq!(y1.cumulative_roi_percent, expected);
    }

    #[test]
    fn test_final_summary_matches_last_year() {
        let result = project(&sample_input()).unwrap();
        let out = &result.result;
        let last = out.years.last().unwrap();

        assert_eq!(out.final_equity, last.cumulative_equity);
        assert_eq!(out.final_cash_flow, last.cumulative_cash_flow);
        assert_eq!(out.final_roi_percent, last.cumulative_roi_percent);
    }

    #[test]
    fn test_zero_down_payment_rejected_at_entry() {
        let mut input = sample_input();
        input.down_payment = Decimal::ZERO;
        match project(&input).unwrap_err() {
            ReiError::InvalidInput { field, .. } => assert_eq!(field, "down_payment"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_horizon_past_loan_term_warns_not_clamps() {
        let mut input = sample_input();
        input.loan_term_years = 5;
        input.years = 10;
        let result = project(&input).unwrap();

        // Straight-line paydown keeps accruing past payoff: 400000/5 * 10
        let y10 = &result.result.years[9];
        let principal_paid =
            y10.cumulative_equity - dec!(100000) - (y10.projected_property_value - dec!(500000));
        assert_eq!(principal_paid, dec!(800000));
        assert!(result.warnings.iter().any(|w| w.contains("loan term")));
    }

    #[test]
    fn test_depreciation_allowed() {
        let mut input = sample_input();
        input.appreciation_rate_percent = dec!(-5);
        let result = project(&input).unwrap();
        let years = &result.result.years;
        assert!(years[0].projected_property_value < dec!(500000));
        assert!(years[9].projected_property_value < years[0].projected_property_value);
    }

    #[test]
    fn test_extreme_appreciation_overflows() {
        let mut input = sample_input();
        input.appreciation_rate_percent = dec!(100000000000000000000000000);
        input.years = 10;
        assert!(matches!(
            project(&input).unwrap_err(),
            ReiError::ArithmeticOverflow { .. }
        ));
    }

    #[test]
    fn test_serde_defaults() {
        let input: ProjectionInput = serde_json::from_str(
            r#"{
                "purchase_price": "500000",
                "down_payment": "100000",
                "loan_amount": "400000",
                "loan_term_years": 30,
                "annual_cash_flow": "3264"
            }"#,
        )
        .unwrap();
        assert_eq!(input.appreciation_rate_percent, dec!(3));
        assert_eq!(input.years, 10);
    }
}
