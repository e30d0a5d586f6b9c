//! Run projections for every row of an input CSV
//!
//! Usage: run_batch [INPUT_CSV] [OUTPUT_CSV]
//!
//! Outputs one summary line (final amount, total interest) per input row.

use std::fs::File;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use savings_projection::scenario::{load_inputs, loader::write_summaries};
use savings_projection::ScenarioRunner;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "data/sample_inputs.csv".to_string());
    let output_path = args.next().unwrap_or_else(|| "batch_projection_output.csv".to_string());

    let start = Instant::now();
    println!("Loading inputs from {}...", input_path);

    let inputs = load_inputs(&input_path)
        .with_context(|| format!("failed to load inputs from {}", input_path))?;
    println!("Loaded {} inputs in {:?}", inputs.len(), start.elapsed());

    let proj_start = Instant::now();
    let results = ScenarioRunner::new().run_batch(&inputs);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let rows: Vec<_> = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| (*input, result.map_err(|e| e.to_string())))
        .collect();

    let file = File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path))?;
    write_summaries(file, &rows)?;
    info!("wrote {} rows to {}", rows.len(), output_path);
    println!("Output written to {}", output_path);

    let rejected = rows.iter().filter(|(_, r)| r.is_err()).count();
    let total_final: f64 = rows
        .iter()
        .filter_map(|(_, r)| r.as_ref().ok())
        .map(|r| r.final_balance())
        .sum();

    println!("\nBatch Summary:");
    println!("  Projected: {}", rows.len() - rejected);
    println!("  Rejected:  {}", rejected);
    println!("  Sum of final amounts: ${:.0}", total_final);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
