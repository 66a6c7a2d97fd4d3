mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::PaymentArgs;
use commands::deal::AnalyzeArgs;
use commands::projection::ProjectArgs;
use commands::scenarios::CompareArgs;

/// Real-estate investment analysis calculations
#[derive(Parser)]
#[command(
    name = "rei",
    version,
    about = "Real-estate investment analysis calculations",
    long_about = "A CLI for analysing rental property investments with decimal precision. \
                  Supports mortgage amortization, deal metrics (cap rate, cash-on-cash, \
                  grading), financing scenario comparison, and multi-year equity/ROI \
                  projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed-rate monthly payment and total interest
    Payment(PaymentArgs),
    /// Analyse a single deal: loan, operating estimate, metrics, grade
    Analyze(AnalyzeArgs),
    /// Compare financing scenarios for one property
    Compare(CompareArgs),
    /// Project equity, cash flow, and ROI over a holding period
    Project(ProjectArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Analyze(args) => commands::deal::run_analyze(args),
        Commands::Compare(args) => commands::scenarios::run_compare(args),
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Version => {
            println!("rei {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
