use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rei_core::amortization::LoanTerms;

/// Arguments for monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub term_years: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PaymentOutput {
    principal: Decimal,
    monthly_rate: Decimal,
    payment_count: u32,
    monthly_payment: Decimal,
    total_interest: Decimal,
    total_paid: Decimal,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = LoanTerms::derive(args.principal, args.rate, args.term_years)?;
    let total_interest = terms.total_interest();
    let output = PaymentOutput {
        principal: terms.principal,
        monthly_rate: terms.monthly_rate,
        payment_count: terms.payment_count,
        monthly_payment: terms.monthly_payment,
        total_interest,
        total_paid: total_interest + terms.principal,
    };
    Ok(serde_json::to_value(output)?)
}
