use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanTerms;
use crate::error::ReiError;
use crate::operating::{self, OperatingConfig, OperatingEstimate};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, PropertyFinancials};
use crate::ReiResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Investment grade for a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
}

/// Minimum metrics a deal must clear to earn one grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBand {
    pub min_cap_rate_percent: Percent,
    pub min_cash_on_cash_percent: Percent,
    pub min_monthly_cash_flow: Money,
}

/// Grading bands, checked A first then B; anything else is C.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeThresholds {
    #[serde(default = "default_grade_a_band")]
    pub grade_a: GradeBand,
    #[serde(default = "default_grade_b_band")]
    pub grade_b: GradeBand,
}

fn default_grade_a_band() -> GradeBand {
    GradeBand {
        min_cap_rate_percent: dec!(7),
        min_cash_on_cash_percent: dec!(10),
        min_monthly_cash_flow: dec!(300),
    }
}

fn default_grade_b_band() -> GradeBand {
    GradeBand {
        min_cap_rate_percent: dec!(5),
        min_cash_on_cash_percent: dec!(5),
        min_monthly_cash_flow: Decimal::ZERO,
    }
}

impl Default for GradeThresholds {
    fn default() -> Self {
        GradeThresholds {
            grade_a: default_grade_a_band(),
            grade_b: default_grade_b_band(),
        }
    }
}

/// Computed return metrics for one financed deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealMetrics {
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub cap_rate_percent: Percent,
    pub cash_on_cash_percent: Percent,
    pub grade: Grade,
}

/// Input for a full single-property analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAnalysisInput {
    pub property: PropertyFinancials,
    #[serde(default)]
    pub operating: OperatingConfig,
    #[serde(default)]
    pub grading: GradeThresholds,
}

/// Complete single-property analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAnalysisOutput {
    pub loan: LoanTerms,
    pub operating: OperatingEstimate,
    pub metrics: DealMetrics,
    /// Interest paid over the life of the loan
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate cash flow, cap rate, cash-on-cash return, and grade for a deal.
///
/// `down_payment` must be positive: cash-on-cash divides by it. Large
/// negative cash-on-cash percentages (thin down payment, negative cash
/// flow) are returned as-is, never clamped.
pub fn evaluate(
    purchase_price: Money,
    down_payment: Money,
    loan: &LoanTerms,
    operating: &OperatingEstimate,
    thresholds: &GradeThresholds,
) -> ReiResult<DealMetrics> {
    if purchase_price <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    if down_payment <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must be positive for cash-on-cash return".into(),
        });
    }

    let monthly_cash_flow = operating.monthly_noi - loan.monthly_payment;
    let annual_cash_flow = monthly_cash_flow * dec!(12);
    let cap_rate_percent = operating.annual_noi / purchase_price * dec!(100);
    let cash_on_cash_percent = annual_cash_flow / down_payment * dec!(100);

    let grade = grade_deal(
        cap_rate_percent,
        cash_on_cash_percent,
        monthly_cash_flow,
        thresholds,
    );

    Ok(DealMetrics {
        monthly_cash_flow,
        annual_cash_flow,
        cap_rate_percent,
        cash_on_cash_percent,
        grade,
    })
}

/// Full analysis of one property: loan terms, operating estimate, metrics.
pub fn analyze_property(
    input: &DealAnalysisInput,
) -> ReiResult<ComputationOutput<DealAnalysisOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    let property = &input.property;

    validate_property(property)?;

    let loan_amount = property.purchase_price - property.down_payment;
    let loan = LoanTerms::derive(
        loan_amount,
        property.annual_interest_rate,
        property.loan_term_years,
    )?;

    let operating = operating::estimate(property.purchase_price, &input.operating)?;

    let metrics = evaluate(
        property.purchase_price,
        property.down_payment,
        &loan,
        &operating,
        &input.grading,
    )?;

    if metrics.monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cash flow of {:.2} — rent does not cover debt service",
            metrics.monthly_cash_flow
        ));
    }
    if property.down_payment < property.purchase_price * dec!(0.05) {
        warnings.push(
            "Down payment below 5% of purchase price — cash-on-cash return is highly leveraged"
                .into(),
        );
    }

    let total_interest = loan.total_interest();

    let output = DealAnalysisOutput {
        loan,
        operating,
        metrics,
        total_interest,
    };

    Ok(with_metadata(
        "Rental Property Investment Analysis",
        input,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// Grade a deal from its three metrics. Bands are checked top-down and the
/// first match wins: A before B, everything else C.
fn grade_deal(
    cap_rate_percent: Percent,
    cash_on_cash_percent: Percent,
    monthly_cash_flow: Money,
    thresholds: &GradeThresholds,
) -> Grade {
    if meets_band(
        cap_rate_percent,
        cash_on_cash_percent,
        monthly_cash_flow,
        &thresholds.grade_a,
    ) {
        return Grade::A;
    }
    if meets_band(
        cap_rate_percent,
        cash_on_cash_percent,
        monthly_cash_flow,
        &thresholds.grade_b,
    ) {
        return Grade::B;
    }
    Grade::C
}

fn meets_band(
    cap_rate_percent: Percent,
    cash_on_cash_percent: Percent,
    monthly_cash_flow: Money,
    band: &GradeBand,
) -> bool {
    cap_rate_percent >= band.min_cap_rate_percent
        && cash_on_cash_percent >= band.min_cash_on_cash_percent
        && monthly_cash_flow >= band.min_monthly_cash_flow
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_property(property: &PropertyFinancials) -> ReiResult<()> {
    if property.purchase_price <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    if property.down_payment < Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if property.down_payment > property.purchase_price {
        return Err(ReiError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot exceed purchase price".into(),
        });
    }
    if property.annual_interest_rate < Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "annual_interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if property.loan_term_years == 0 {
        return Err(ReiError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
