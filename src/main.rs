//! Savings calculator CLI
//!
//! Command-line interface for running savings projections and currency
//! conversions

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use savings_projection::config::Config;
use savings_projection::currency::{convert, RateTable};
use savings_projection::format::format_currency;
use savings_projection::{project, ProjectionInput, ProjectionResult};

#[derive(Debug, Parser)]
#[command(name = "savings", version, about = "Savings projections and currency conversion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project savings year by year
    Project {
        /// Starting principal (default from SAVINGS_DEFAULT_INITIAL)
        #[arg(long)]
        initial: Option<f64>,

        /// Contribution added every month
        #[arg(long, allow_negative_numbers = true)]
        monthly: Option<f64>,

        /// Nominal annual interest rate in percent
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,

        /// Number of years to project
        #[arg(long, allow_negative_numbers = true)]
        years: Option<i32>,

        /// Write the yearly schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the schedule as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount between currencies
    Convert {
        from: String,
        to: String,
        amount: f64,

        /// Rate table (default from SAVINGS_RATES_PATH)
        #[arg(long)]
        rates: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load().context("invalid configuration")?;

    match cli.command {
        Command::Project { initial, monthly, rate, years, csv, json } => {
            let defaults = config.defaults;
            let input = ProjectionInput::new(
                initial.unwrap_or(defaults.initial_amount),
                monthly.unwrap_or(defaults.monthly_contribution),
                rate.unwrap_or(defaults.annual_interest_rate_percent),
                years.unwrap_or(defaults.years),
            );
            let result = project(&input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_table(&input, &result);
            }

            if let Some(path) = csv {
                write_csv(&path, &result)?;
                println!("\nFull results written to: {}", path.display());
            }
        }
        Command::Convert { from, to, amount, rates } => {
            let path = rates.unwrap_or(config.rates_path);
            let table = RateTable::from_csv_path(&path, &config.rates_anchor, Utc::now().timestamp())
                .with_context(|| format!("failed to load rates from {}", path.display()))?;

            let conversion = convert(&table, &from.to_uppercase(), &to.to_uppercase(), amount, Utc::now())?;
            println!(
                "{} {} = {:.2} {}",
                conversion.amount,
                conversion.from_currency,
                conversion.result,
                conversion.to_currency
            );
            println!(
                "Exchange Rate: 1 {} = {:.6} {}",
                conversion.from_currency, conversion.rate, conversion.to_currency
            );
        }
    }

    Ok(())
}

fn print_table(input: &ProjectionInput, result: &ProjectionResult) {
    println!("Savings Projection");
    println!("==================\n");
    println!("  Initial Amount:       {}", format_currency(input.initial_amount));
    println!("  Monthly Contribution: {}", format_currency(input.monthly_contribution));
    println!("  Annual Interest Rate: {}%", input.annual_interest_rate_percent);
    println!("  Period:               {} years", input.years);
    println!();

    println!("{:>4} {:>16} {:>14} {:>16}", "Year", "Savings", "Interest", "Contributions");
    println!("{}", "-".repeat(53));
    for row in &result.years {
        println!(
            "{:>4} {:>16} {:>14} {:>16}",
            row.year,
            format_currency(row.ending_balance),
            format_currency(row.yearly_interest),
            format_currency(row.cumulative_contributions),
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Final Amount:   {}", format_currency(summary.final_balance));
    println!("  Total Interest: {}", format_currency(summary.total_interest));
}

fn write_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &result.years {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
