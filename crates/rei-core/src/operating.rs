use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ReiError;
use crate::types::{Money, Rate};
use crate::ReiResult;

/// Income and expense assumptions applied to a purchase price.
///
/// Defaults follow the screening heuristics the analysis was built on:
/// monthly rent at 0.8% of price (the "0.8% rule") and operating expenses
/// at 30% of rent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingConfig {
    #[serde(default = "default_rent_to_price_ratio")]
    pub rent_to_price_ratio: Rate,
    #[serde(default = "default_operating_expense_ratio")]
    pub operating_expense_ratio: Rate,
}

fn default_rent_to_price_ratio() -> Rate {
    dec!(0.008)
}

fn default_operating_expense_ratio() -> Rate {
    dec!(0.30)
}

impl Default for OperatingConfig {
    fn default() -> Self {
        OperatingConfig {
            rent_to_price_ratio: default_rent_to_price_ratio(),
            operating_expense_ratio: default_operating_expense_ratio(),
        }
    }
}

/// Estimated operating income for one property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingEstimate {
    pub monthly_rent: Money,
    pub monthly_expenses: Money,
    pub monthly_noi: Money,
    pub annual_noi: Money,
}

/// Estimate rent, expenses, and NOI from the purchase price.
pub fn estimate(purchase_price: Money, config: &OperatingConfig) -> ReiResult<OperatingEstimate> {
    if purchase_price <= Decimal::ZERO {
        return Err(ReiError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    validate_ratio(config.rent_to_price_ratio, "rent_to_price_ratio")?;
    validate_ratio(config.operating_expense_ratio, "operating_expense_ratio")?;

    let monthly_rent = purchase_price * config.rent_to_price_ratio;
    let monthly_expenses = monthly_rent * config.operating_expense_ratio;
    let monthly_noi = monthly_rent - monthly_expenses;
    let annual_noi = monthly_noi * dec!(12);

    Ok(OperatingEstimate {
        monthly_rent,
        monthly_expenses,
        monthly_noi,
        annual_noi,
    })
}

fn validate_ratio(value: Rate, field: &str) -> ReiResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ReiError::InvalidInput {
            field: field.into(),
            reason: format!("Ratio must be between 0 and 1 (got {value})"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_estimate() {
        // $500k at defaults: rent $4,000, expenses $1,200, NOI $2,800
        let est = estimate(dec!(500000), &OperatingConfig::default()).unwrap();
        assert_eq!(est.monthly_rent, dec!(4000));
        assert_eq!(est.monthly_expenses, dec!(1200));
        assert_eq!(est.monthly_noi, dec!(2800));
        assert_eq!(est.annual_noi, dec!(33600));
    }

    #[test]
    fn test_override_ratios() {
        let config = OperatingConfig {
            rent_to_price_ratio: dec!(0.01),
            operating_expense_ratio: dec!(0.50),
        };
        let est = estimate(dec!(300000), &config).unwrap();
        assert_eq!(est.monthly_rent, dec!(3000));
        assert_eq!(est.monthly_expenses, dec!(1500));
        assert_eq!(est.monthly_noi, dec!(1500));
    }

    #[test]
    fn test_zero_expense_ratio() {
        let config = OperatingConfig {
            rent_to_price_ratio: dec!(0.008),
            operating_expense_ratio: Decimal::ZERO,
        };
        let est = estimate(dec!(500000), &config).unwrap();
        assert_eq!(est.monthly_noi, est.monthly_rent);
    }

    #[test]
    fn test_invalid_price() {
        assert!(estimate(Decimal::ZERO, &OperatingConfig::default()).is_err());
        assert!(estimate(dec!(-1000), &OperatingConfig::default()).is_err());
    }

    #[test]
    fn test_ratio_out_of_range() {
        let config = OperatingConfig {
            rent_to_price_ratio: dec!(1.5),
            operating_expense_ratio: dec!(0.30),
        };
        match estimate(dec!(500000), &config).unwrap_err() {
            ReiError::InvalidInput { field, .. } => assert_eq!(field, "rent_to_price_ratio"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }

        let config = OperatingConfig {
            rent_to_price_ratio: dec!(0.008),
            operating_expense_ratio: dec!(-0.1),
        };
        match estimate(dec!(500000), &config).unwrap_err() {
            ReiError::InvalidInput { field, .. } => assert_eq!(field, "operating_expense_ratio"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: OperatingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.rent_to_price_ratio, dec!(0.008));
        assert_eq!(config.operating_expense_ratio, dec!(0.30));
    }
}
