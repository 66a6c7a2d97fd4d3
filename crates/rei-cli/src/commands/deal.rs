use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rei_core::deal::{self, DealAnalysisInput, GradeThresholds};
use rei_core::operating::OperatingConfig;
use rei_core::types::PropertyFinancials;

use crate::input;

/// Arguments for single-deal analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (DealAnalysisInput shape)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Monthly rent as a fraction of price (default 0.008)
    #[arg(long)]
    pub rent_ratio: Option<Decimal>,

    /// Operating expenses as a fraction of rent (default 0.30)
    #[arg(long)]
    pub expense_ratio: Option<Decimal>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input: DealAnalysisInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let (Some(price), Some(down), Some(rate), Some(term)) =
        (args.price, args.down_payment, args.rate, args.term_years)
    {
        let mut operating = OperatingConfig::default();
        if let Some(rent_ratio) = args.rent_ratio {
            operating.rent_to_price_ratio = rent_ratio;
        }
        if let Some(expense_ratio) = args.expense_ratio {
            operating.operating_expense_ratio = expense_ratio;
        }
        DealAnalysisInput {
            property: PropertyFinancials {
                purchase_price: price,
                down_payment: down,
                annual_interest_rate: rate,
                loan_term_years: term,
            },
            operating,
            grading: GradeThresholds::default(),
        }
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "provide --price/--down-payment/--rate/--term-years, --input <file.json>, or stdin"
                .into(),
        );
    };

    let result = deal::analyze_property(&deal_input)?;
    Ok(serde_json::to_value(result)?)
}
