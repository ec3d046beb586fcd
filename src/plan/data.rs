//! Plan input structures matching the calculator's parameter format

use crate::error::PlanError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often new money is added to the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionFrequency {
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
    Yearly,
}

impl ContributionFrequency {
    /// Multiplier turning one contribution into its monthly equivalent.
    /// Yearly contributions are not spread; they land whole in month 12.
    pub fn monthly_multiplier(&self) -> f64 {
        match self {
            ContributionFrequency::Weekly => 4.333,
            ContributionFrequency::BiWeekly => 2.166,
            ContributionFrequency::Monthly => 1.0,
            ContributionFrequency::Yearly => 1.0,
        }
    }

    pub fn is_yearly(&self) -> bool {
        matches!(self, ContributionFrequency::Yearly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionFrequency::Weekly => "weekly",
            ContributionFrequency::BiWeekly => "bi-weekly",
            ContributionFrequency::Monthly => "monthly",
            ContributionFrequency::Yearly => "yearly",
        }
    }
}

impl FromStr for ContributionFrequency {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(ContributionFrequency::Weekly),
            "bi-weekly" | "biweekly" => Ok(ContributionFrequency::BiWeekly),
            "monthly" => Ok(ContributionFrequency::Monthly),
            "yearly" | "annual" => Ok(ContributionFrequency::Yearly),
            _ => Err(PlanError::UnknownContributionFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for ContributionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often accrued interest is added to the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl CompoundingFrequency {
    /// Compounding periods per year (the `n` in r/n)
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Yearly => 1,
        }
    }

    /// Months between two compounding events
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Whether interest is credited at the end of the given 1-indexed month
    pub fn compounds_in(&self, month: u32) -> bool {
        month % self.months_per_period() == 0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::Yearly => "yearly",
        }
    }
}

impl FromStr for CompoundingFrequency {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(CompoundingFrequency::Monthly),
            "quarterly" => Ok(CompoundingFrequency::Quarterly),
            "yearly" | "annual" => Ok(CompoundingFrequency::Yearly),
            _ => Err(PlanError::UnknownCompoundingFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When tax on interest is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxTiming {
    /// Deducted from each compounding period's interest
    Yearly,
    /// Charged once on net growth after the last month
    #[default]
    End,
}

impl TaxTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxTiming::Yearly => "yearly",
            TaxTiming::End => "end",
        }
    }
}

impl FromStr for TaxTiming {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yearly" => Ok(TaxTiming::Yearly),
            "end" => Ok(TaxTiming::End),
            _ => Err(PlanError::UnknownTaxTiming(s.to_string())),
        }
    }
}

impl fmt::Display for TaxTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Shared plans may carry `null` where a number was undefined
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

/// Caller-supplied plan parameters
///
/// Percentages are given as percent (7.0 means 7%). Any field missing from
/// serialized input takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanInputs {
    /// Lump sum invested before month 1
    #[serde(deserialize_with = "null_as_default")]
    pub initial_deposit: f64,

    /// Amount added per contribution period
    #[serde(deserialize_with = "null_as_default")]
    pub contribution: f64,

    #[serde(deserialize_with = "null_as_default")]
    pub contribution_frequency: ContributionFrequency,

    /// Annual step-up of the contribution (%)
    #[serde(deserialize_with = "null_as_default")]
    pub annual_step_up: f64,

    /// Nominal annual interest rate (%)
    #[serde(deserialize_with = "null_as_default")]
    pub interest_rate: f64,

    /// Horizon in whole years
    #[serde(deserialize_with = "null_as_default")]
    pub years: i32,

    #[serde(deserialize_with = "null_as_default")]
    pub compounding_frequency: CompoundingFrequency,

    /// Annual inflation rate (%)
    #[serde(deserialize_with = "null_as_default")]
    pub inflation_rate: f64,

    /// Tax rate on interest (%)
    #[serde(deserialize_with = "null_as_default")]
    pub tax_rate: f64,

    #[serde(deserialize_with = "null_as_default")]
    pub tax_timing: TaxTiming,

    /// Goal balance; 0 disables the goal check
    #[serde(deserialize_with = "null_as_default")]
    pub target_amount: f64,

    /// Display-only currency code
    #[serde(default = "default_currency", deserialize_with = "null_as_default_currency")]
    pub currency: String,
}

impl Default for PlanInputs {
    fn default() -> Self {
        Self {
            initial_deposit: 0.0,
            contribution: 0.0,
            contribution_frequency: ContributionFrequency::default(),
            annual_step_up: 0.0,
            interest_rate: 0.0,
            years: 0,
            compounding_frequency: CompoundingFrequency::default(),
            inflation_rate: 0.0,
            tax_rate: 0.0,
            tax_timing: TaxTiming::default(),
            target_amount: 0.0,
            currency: default_currency(),
        }
    }
}

impl PlanInputs {
    /// Plan with a starting deposit, monthly contribution, rate and horizon;
    /// everything else at its default
    pub fn new(initial_deposit: f64, contribution: f64, interest_rate: f64, years: i32) -> Self {
        Self {
            initial_deposit,
            contribution,
            interest_rate,
            years,
            ..Default::default()
        }
    }
}
