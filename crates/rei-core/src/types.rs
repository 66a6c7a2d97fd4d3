use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.008 = 0.8%). Used for configuration ratios.
pub type Rate = Decimal;

/// Rates expressed in percentage points (6.5 = 6.5%). Used wherever the
/// presentation layer enters or displays a percentage directly.
pub type Percent = Decimal;

/// Purchase and financing terms for a single property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyFinancials {
    pub purchase_price: Money,
    pub down_payment: Money,
    /// Annual interest rate in percentage points (6.5 = 6.5%)
    pub annual_interest_rate: Percent,
    pub loan_term_years: u32,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
