//! Load projection inputs from CSV
//!
//! Expected columns: `initialAmount,monthlyContribution,interestRate,years`

use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LoadError;
use crate::projection::{ProjectionInput, ProjectionResult};

/// Raw CSV row, column names matching the stored history records
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "initialAmount")]
    initial_amount: f64,
    #[serde(rename = "monthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "interestRate")]
    interest_rate: f64,
    #[serde(rename = "years")]
    years: i32,
}

impl CsvRow {
    fn into_input(self) -> ProjectionInput {
        ProjectionInput::new(
            self.initial_amount,
            self.monthly_contribution,
            self.interest_rate,
            self.years,
        )
    }
}

/// Load all inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectionInput>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load inputs from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ProjectionInput>, LoadError> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<ProjectionInput>, LoadError> {
    let mut inputs = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.into_input());
    }
    Ok(inputs)
}

/// One line of batch output
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "initialAmount")]
    initial_amount: f64,
    #[serde(rename = "monthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "interestRate")]
    interest_rate: f64,
    #[serde(rename = "years")]
    years: i32,
    #[serde(rename = "finalAmount")]
    final_amount: Option<f64>,
    #[serde(rename = "totalInterest")]
    total_interest: Option<f64>,
    #[serde(rename = "error")]
    error: Option<&'a str>,
}

/// Write one summary line per input; rejected inputs carry their error text
pub fn write_summaries<W: std::io::Write>(
    writer: W,
    rows: &[(ProjectionInput, Result<ProjectionResult, String>)],
) -> Result<(), LoadError> {
    let mut csv_writer = Writer::from_writer(writer);

    for (input, outcome) in rows {
        let (final_amount, total_interest, error) = match outcome {
            Ok(result) => (Some(result.final_balance()), Some(result.total_interest()), None),
            Err(message) => (None, None, Some(message.as_str())),
        };
        csv_writer.serialize(SummaryRow {
            initial_amount: input.initial_amount,
            monthly_contribution: input.monthly_contribution,
            interest_rate: input.annual_interest_rate_percent,
            years: input.years,
            final_amount,
            total_interest,
            error,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    const SAMPLE: &str = "initialAmount,monthlyContribution,interestRate,years
1000,100,5,1
0,0,10,5
2500.5,-25,3.75,0
";

    #[test]
    fn test_load_inputs_from_reader() {
        let inputs = load_inputs_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0], ProjectionInput::new(1000.0, 100.0, 5.0, 1));
        assert_eq!(inputs[2].initial_amount, 2500.5);
        assert_eq!(inputs[2].monthly_contribution, -25.0);
        assert_eq!(inputs[2].years, 0);
    }

    #[test]
    fn test_bad_row_is_an_error() {
        let data = "initialAmount,monthlyContribution,interestRate,years\nabc,1,1,1\n";
        assert!(matches!(load_inputs_from_reader(data.as_bytes()), Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_write_summaries() {
        let inputs = load_inputs_from_reader(SAMPLE.as_bytes()).unwrap();
        let rows: Vec<_> = inputs
            .iter()
            .map(|input| (*input, project(input).map_err(|e| e.to_string())))
            .collect();

        let mut out = Vec::new();
        write_summaries(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "initialAmount,monthlyContribution,interestRate,years,finalAmount,totalInterest,error"
        );
        assert_eq!(lines[1], "1000.0,100.0,5.0,1,2279.0,79.0,");
        assert!(lines[3].contains("years must be at least 1"));
    }
}
