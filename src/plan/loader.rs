//! Load plans from CSV or JSON

use super::{CompoundingFrequency, ContributionFrequency, PlanInputs, TaxTiming};
use crate::error::Result;
use csv::Reader;
use log::info;
use std::fs;
use std::path::Path;

/// Raw CSV row; every column is optional and falls back to the plan default
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CsvRow {
    initial_deposit: Option<f64>,
    contribution: Option<f64>,
    contribution_frequency: Option<String>,
    annual_step_up: Option<f64>,
    interest_rate: Option<f64>,
    years: Option<i32>,
    compounding_frequency: Option<String>,
    inflation_rate: Option<f64>,
    tax_rate: Option<f64>,
    tax_timing: Option<String>,
    target_amount: Option<f64>,
    currency: Option<String>,
}

/// Blank cells count as missing
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl CsvRow {
    fn to_plan(self) -> Result<PlanInputs> {
        let defaults = PlanInputs::default();

        let contribution_frequency = match non_blank(self.contribution_frequency) {
            Some(label) => label.parse::<ContributionFrequency>()?,
            None => defaults.contribution_frequency,
        };

        let compounding_frequency = match non_blank(self.compounding_frequency) {
            Some(label) => label.parse::<CompoundingFrequency>()?,
            None => defaults.compounding_frequency,
        };

        let tax_timing = match non_blank(self.tax_timing) {
            Some(label) => label.parse::<TaxTiming>()?,
            None => defaults.tax_timing,
        };

        Ok(PlanInputs {
            initial_deposit: self.initial_deposit.unwrap_or(defaults.initial_deposit),
            contribution: self.contribution.unwrap_or(defaults.contribution),
            contribution_frequency,
            annual_step_up: self.annual_step_up.unwrap_or(defaults.annual_step_up),
            interest_rate: self.interest_rate.unwrap_or(defaults.interest_rate),
            years: self.years.unwrap_or(defaults.years),
            compounding_frequency,
            inflation_rate: self.inflation_rate.unwrap_or(defaults.inflation_rate),
            tax_rate: self.tax_rate.unwrap_or(defaults.tax_rate),
            tax_timing,
            target_amount: self.target_amount.unwrap_or(defaults.target_amount),
            currency: non_blank(self.currency).unwrap_or(defaults.currency),
        })
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<PlanInputs>> {
    let path = path.as_ref();
    let plans = load_plans_from_reader(fs::File::open(path)?)?;
    info!("Loaded {} plans from {}", plans.len(), path.display());
    Ok(plans)
}

/// Load plans from any reader (e.g., string buffer, network stream)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PlanInputs>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_plan()?);
    }

    Ok(plans)
}

/// Parse a single plan from JSON text
pub fn plan_from_json(json: &str) -> Result<PlanInputs> {
    Ok(serde_json::from_str(json)?)
}

/// Load a single plan from a JSON file
pub fn load_plan_json<P: AsRef<Path>>(path: P) -> Result<PlanInputs> {
    plan_from_json(&fs::read_to_string(path)?)
}
