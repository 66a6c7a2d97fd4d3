use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanTerms;
use crate::deal::{self, DealMetrics, GradeThresholds};
use crate::error::ReiError;
use crate::operating::{self, OperatingConfig, OperatingEstimate};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::ReiResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A named alternative financing assumption evaluated against one property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingScenario {
    pub name: String,
    /// Down payment as a fraction of purchase price (0.20 = 20% down)
    pub down_payment_ratio: Rate,
    /// Annual interest rate in percentage points (6.5 = 6.5%)
    pub annual_interest_rate: Percent,
    pub loan_term_years: u32,
}

/// Input for multi-scenario financing comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonInput {
    pub purchase_price: Money,
    pub scenarios: Vec<FinancingScenario>,
    #[serde(default)]
    pub operating: OperatingConfig,
    #[serde(default)]
    pub grading: GradeThresholds,
}

/// One comparison row. On a per-scenario input failure `error` carries the
/// message and the derived fields stay empty; siblings are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: FinancingScenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanTerms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DealMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ordered comparison output. `results` always has one entry per input
/// scenario, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonOutput {
    pub results: Vec<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_by_cash_flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_by_cash_on_cash: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare financing scenarios for one property.
///
/// Scenarios are independent: each derives its own down payment, loan terms,
/// and metrics, and an invalid scenario is reported in its own row without
/// aborting the rest. Results preserve input order regardless of evaluation
/// order.
pub fn compare(
    input: &ScenarioComparisonInput,
) -> ReiResult<ComputationOutput<ScenarioComparisonOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    if input.purchase_price <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }

    // Rent and NOI depend only on the shared price and config; estimate once
    let operating = operating::estimate(input.purchase_price, &input.operating)?;

    let mut results = Vec::with_capacity(input.scenarios.len());

    for scenario in &input.scenarios {
        match evaluate_scenario(input.purchase_price, scenario, &operating, &input.grading) {
            Ok((down_payment, loan, metrics)) => results.push(ScenarioResult {
                scenario: scenario.clone(),
                down_payment: Some(down_payment),
                loan: Some(loan),
                metrics: Some(metrics),
                error: None,
            }),
            Err(e) => {
                warnings.push(format!("Scenario '{}' failed: {e}", scenario.name));
                results.push(ScenarioResult {
                    scenario: scenario.clone(),
                    down_payment: None,
                    loan: None,
                    metrics: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let best_by_cash_flow = best_scenario(&results, |m| m.monthly_cash_flow);
    let best_by_cash_on_cash = best_scenario(&results, |m| m.cash_on_cash_percent);

    let output = ScenarioComparisonOutput {
        results,
        best_by_cash_flow,
        best_by_cash_on_cash,
    };

    Ok(with_metadata(
        "Financing Scenario Comparison",
        &serde_json::json!({
            "purchase_price": input.purchase_price.to_string(),
            "num_scenarios": input.scenarios.len(),
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Per-scenario evaluation
// ---------------------------------------------------------------------------

fn evaluate_scenario(
    purchase_price: Money,
    scenario: &FinancingScenario,
    operating: &OperatingEstimate,
    grading: &GradeThresholds,
) -> ReiResult<(Money, LoanTerms, DealMetrics)> {
    if scenario.down_payment_ratio < Decimal::ZERO || scenario.down_payment_ratio > Decimal::ONE {
        return Err(ReiError::InvalidInput {
            field: "down_payment_ratio".into(),
            reason: format!(
                "Ratio must be between 0 and 1 (got {})",
                scenario.down_payment_ratio
            ),
        });
    }

    let down_payment = purchase_price * scenario.down_payment_ratio;
    let loan = LoanTerms::derive(
        purchase_price - down_payment,
        scenario.annual_interest_rate,
        scenario.loan_term_years,
    )?;
    let metrics = deal::evaluate(purchase_price, down_payment, &loan, operating, grading)?;

    Ok((down_payment, loan, metrics))
}

/// Name of the best successful scenario by `key`, earliest entry on ties.
fn best_scenario<F>(results: &[ScenarioResult], key: F) -> Option<String>
where
    F: Fn(&DealMetrics) -> Decimal,
{
    let mut best: Option<(&ScenarioResult, Decimal)> = None;
    for result in results {
        if let Some(metrics) = &result.metrics {
            let value = key(metrics);
            match &best {
                Some((_, best_value)) if value <= *best_value => {}
                _ => best = Some((result, value)),
            }
        }
    }
    best.map(|(r, _)| r.scenario.name.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
