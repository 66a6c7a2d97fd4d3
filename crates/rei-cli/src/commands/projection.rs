use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rei_core::projection::{self, ProjectionInput};

use crate::input;

/// Arguments for multi-year projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON input file (ProjectionInput shape)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// First-year annual cash flow
    #[arg(long, allow_hyphen_values = true)]
    pub annual_cash_flow: Option<Decimal>,

    /// Annual appreciation in percent
    #[arg(long, default_value = "3", allow_hyphen_values = true)]
    pub appreciation: Decimal,

    /// Projection horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let (Some(price), Some(down), Some(loan), Some(term), Some(cash_flow)) = (
        args.price,
        args.down_payment,
        args.loan_amount,
        args.term_years,
        args.annual_cash_flow,
    ) {
        ProjectionInput {
            purchase_price: price,
            down_payment: down,
            loan_amount: loan,
            loan_term_years: term,
            annual_cash_flow: cash_flow,
            appreciation_rate_percent: args.appreciation,
            years: args.years,
        }
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "provide --price/--down-payment/--loan-amount/--term-years/--annual-cash-flow, \
             --input <file.json>, or stdin"
                .into(),
        );
    };

    let result = projection::project(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}
