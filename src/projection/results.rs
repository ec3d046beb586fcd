//! Output structures for projections

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Snapshot of the plan at the end of one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year: u32,

    /// Initial deposit, constant across records
    pub principal: f64,

    /// Contributions to date, excluding the initial deposit
    pub contributions: f64,

    /// Net growth to date (balance minus everything contributed)
    pub interest: f64,

    pub total_balance: f64,

    pub inflation_adjusted: f64,

    pub optimistic_balance: f64,

    pub pessimistic_balance: f64,
}

/// One simulated month, recorded only when tracing is requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    pub month: u32,
    pub year: u32,

    /// Amount credited this month
    pub contribution: f64,

    /// Per-period contribution baseline after step-ups
    pub contribution_baseline: f64,

    pub compounded: bool,
    pub gross_interest: f64,
    pub tax: f64,
    pub balance: f64,
    pub total_deposits: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_deposits: f64,

    /// Final balance minus total deposits, net of any tax already taken
    pub total_interest: f64,

    pub total_tax: f64,

    pub final_balance: f64,

    pub final_balance_adjusted: f64,

    pub yearly_breakdown: Vec<YearRecord>,

    pub goal_reached_year: Option<u32>,

    /// Rule-of-72 estimate in years, 0 for non-positive rates
    pub doubling_time: f64,

    /// Final balance over total deposits, 0 when nothing was deposited
    pub multiplier: f64,
}

impl ProjectionResult {
    /// Empty result for a plan with the given starting deposit
    pub fn new(initial_deposit: f64) -> Self {
        Self {
            total_deposits: initial_deposit,
            total_interest: 0.0,
            total_tax: 0.0,
            final_balance: initial_deposit,
            final_balance_adjusted: initial_deposit,
            yearly_breakdown: Vec::new(),
            goal_reached_year: None,
            doubling_time: 0.0,
            multiplier: 0.0,
        }
    }

    /// Add a year-end snapshot
    pub fn add_year(&mut self, record: YearRecord) {
        self.yearly_breakdown.push(record);
    }

    /// Number of years simulated
    pub fn years(&self) -> usize {
        self.yearly_breakdown.len()
    }
}

/// CSV row for the yearly breakdown export
#[derive(Debug, Serialize)]
struct BreakdownRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Principal")]
    principal: String,
    #[serde(rename = "Contributions")]
    contributions: String,
    #[serde(rename = "Total Interest")]
    interest: String,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Inflation Adjusted")]
    inflation_adjusted: String,
    #[serde(rename = "Optimistic")]
    optimistic: String,
    #[serde(rename = "Pessimistic")]
    pessimistic: String,
}

impl From<&YearRecord> for BreakdownRow {
    fn from(record: &YearRecord) -> Self {
        Self {
            year: record.year,
            principal: format!("{:.2}", record.principal),
            contributions: format!("{:.2}", record.contributions),
            interest: format!("{:.2}", record.interest),
            balance: format!("{:.2}", record.total_balance),
            inflation_adjusted: format!("{:.2}", record.inflation_adjusted),
            optimistic: format!("{:.2}", record.optimistic_balance),
            pessimistic: format!("{:.2}", record.pessimistic_balance),
        }
    }
}

const BREAKDOWN_HEADERS: [&str; 8] = [
    "Year",
    "Principal",
    "Contributions",
    "Total Interest",
    "Balance",
    "Inflation Adjusted",
    "Optimistic",
    "Pessimistic",
];

/// Write the yearly breakdown as CSV with two-decimal amounts
pub fn write_breakdown_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // Header written explicitly so an empty breakdown still gets one
    csv_writer.write_record(BREAKDOWN_HEADERS)?;
    for record in &result.yearly_breakdown {
        csv_writer.serialize(BreakdownRow::from(record))?;
    }
    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u32, balance: f64) -> YearRecord {
        YearRecord {
            year,
            principal: 1000.0,
            contributions: 100.0 * year as f64,
            interest: balance - 1000.0 - 100.0 * year as f64,
            total_balance: balance,
            inflation_adjusted: balance / 1.02,
            optimistic_balance: balance + 10.0,
            pessimistic_balance: balance - 10.0,
        }
    }

    #[test]
    fn test_breakdown_csv() {
        let mut result = ProjectionResult::new(1000.0);
        result.add_year(record(1, 1150.0));
        result.add_year(record(2, 1312.5));

        let mut out = Vec::new();
        write_breakdown_csv(&result, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Year,Principal,Contributions,Total Interest,Balance,Inflation Adjusted,Optimistic,Pessimistic"
        );
        assert_eq!(lines[2], "2,1000.00,200.00,112.50,1312.50,1286.76,1322.50,1302.50");
    }

    #[test]
    fn test_empty_breakdown_has_header() {
        let mut out = Vec::new();
        write_breakdown_csv(&ProjectionResult::new(0.0), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_result_json_field_names() {
        let json = serde_json::to_value(ProjectionResult::new(10.0)).unwrap();
        assert_eq!(json["finalBalance"], 10.0);
        assert!(json["goalReachedYear"].is_null());
        assert!(json["yearlyBreakdown"].as_array().unwrap().is_empty());
    }
}
