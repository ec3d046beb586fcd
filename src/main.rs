//! Growth Projection CLI
//!
//! Command-line interface for running plan projections

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use growth_projection::currency::format_currency;
use growth_projection::plan::{load_plan_json, load_plans};
use growth_projection::projection::write_breakdown_csv;
use growth_projection::{
    CompoundingFrequency, ContributionFrequency, PlanInputs, ProjectionConfig, ProjectionResult,
    ScenarioRunner, TaxTiming,
};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Project the future value of a savings plan", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project a single plan and print the yearly breakdown
    Run(RunArgs),
    /// Project every plan in a CSV file
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Read the plan from a JSON file instead of flags
    #[arg(long)]
    plan: Option<PathBuf>,

    #[arg(long, default_value_t = 10_000.0)]
    initial_deposit: f64,

    #[arg(long, default_value_t = 500.0)]
    contribution: f64,

    /// weekly, bi-weekly, monthly or yearly
    #[arg(long, default_value = "monthly")]
    contribution_frequency: ContributionFrequency,

    /// Annual contribution step-up (%)
    #[arg(long, default_value_t = 0.0)]
    step_up: f64,

    /// Annual interest rate (%)
    #[arg(long, default_value_t = 7.0)]
    rate: f64,

    #[arg(long, default_value_t = 10)]
    years: i32,

    /// monthly, quarterly or yearly
    #[arg(long, default_value = "monthly")]
    compounding: CompoundingFrequency,

    /// Annual inflation rate (%)
    #[arg(long, default_value_t = 2.5)]
    inflation: f64,

    /// Tax rate on interest (%)
    #[arg(long, default_value_t = 0.0)]
    tax_rate: f64,

    /// yearly or end
    #[arg(long, default_value = "end")]
    tax_timing: TaxTiming,

    /// Goal balance (0 disables)
    #[arg(long, default_value_t = 0.0)]
    target: f64,

    #[arg(long, default_value = "USD")]
    currency: String,

    /// Write the yearly breakdown to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn to_plan(&self) -> Result<PlanInputs> {
        if let Some(path) = &self.plan {
            return load_plan_json(path)
                .with_context(|| format!("Failed to load plan from {}", path.display()));
        }

        Ok(PlanInputs {
            initial_deposit: self.initial_deposit,
            contribution: self.contribution,
            contribution_frequency: self.contribution_frequency,
            annual_step_up: self.step_up,
            interest_rate: self.rate,
            years: self.years,
            compounding_frequency: self.compounding,
            inflation_rate: self.inflation,
            tax_rate: self.tax_rate,
            tax_timing: self.tax_timing,
            target_amount: self.target,
            currency: self.currency.clone(),
        })
    }
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV of plans, one per row, camelCase headers
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write one summary row per plan
    #[arg(short, long, default_value = "projection_summary.csv")]
    output: PathBuf,
}

/// Summary row written by the batch command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRow {
    plan: usize,
    currency: String,
    years: usize,
    total_deposits: f64,
    total_interest: f64,
    total_tax: f64,
    final_balance: f64,
    final_balance_adjusted: f64,
    goal_reached_year: Option<u32>,
    doubling_time: f64,
    multiplier: f64,
}

impl SummaryRow {
    fn new(plan: usize, inputs: &PlanInputs, result: &ProjectionResult) -> Self {
        Self {
            plan,
            currency: inputs.currency.clone(),
            years: result.years(),
            total_deposits: result.total_deposits,
            total_interest: result.total_interest,
            total_tax: result.total_tax,
            final_balance: result.final_balance,
            final_balance_adjusted: result.final_balance_adjusted,
            goal_reached_year: result.goal_reached_year,
            doubling_time: result.doubling_time,
            multiplier: result.multiplier,
        }
    }
}

fn run(args: &RunArgs, runner: &ScenarioRunner) -> Result<()> {
    let plan = args.to_plan()?;
    let result = runner.run(&plan);

    if args.json {
        let stdout = io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &result).context("Failed to write JSON")?;
        println!();
    } else {
        print_report(&plan, &result);
    }

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        write_breakdown_csv(&result, BufWriter::new(file))?;
        println!("\nYearly breakdown written to: {}", path.display());
    }

    Ok(())
}

fn print_report(plan: &PlanInputs, result: &ProjectionResult) {
    let money = |value: f64| format_currency(value, &plan.currency);

    println!("Projection ({} years, {} compounding):", result.years(), plan.compounding_frequency);
    println!(
        "{:>4} {:>16} {:>16} {:>16} {:>16} {:>16}",
        "Year", "Contributions", "Interest", "Balance", "Real Balance", "Range"
    );
    println!("{}", "-".repeat(100));

    for row in &result.yearly_breakdown {
        println!(
            "{:>4} {:>16} {:>16} {:>16} {:>16} {:>8}..{}",
            row.year,
            money(row.principal + row.contributions),
            money(row.interest),
            money(row.total_balance),
            money(row.inflation_adjusted),
            money(row.pessimistic_balance),
            money(row.optimistic_balance),
        );
    }

    println!("\nSummary:");
    println!("  Total Deposits: {}", money(result.total_deposits));
    println!("  Total Interest: {}", money(result.total_interest));
    println!("  Total Tax: {}", money(result.total_tax));
    println!("  Final Balance: {}", money(result.final_balance));
    println!("  Inflation Adjusted: {}", money(result.final_balance_adjusted));
    println!("  Multiplier: {:.2}x", result.multiplier);
    if result.doubling_time > 0.0 {
        println!("  Doubling Time: {:.1} years", result.doubling_time);
    }
    if plan.target_amount > 0.0 {
        match result.goal_reached_year {
            Some(year) => println!("  Goal of {} reached in year {}", money(plan.target_amount), year),
            None => println!("  Goal of {} not reached", money(plan.target_amount)),
        }
    }
}

fn batch(args: &BatchArgs, runner: &ScenarioRunner) -> Result<()> {
    let start = Instant::now();
    let plans = load_plans(&args.input)
        .with_context(|| format!("Failed to load plans from {}", args.input.display()))?;

    let results = runner.run_batch(&plans);
    info!("Projected {} plans in {:?}", results.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Unable to create {}", args.output.display()))?;
    for (i, (plan, result)) in plans.iter().zip(&results).enumerate() {
        writer.serialize(SummaryRow::new(i + 1, plan, result))?;
    }
    writer.flush()?;

    println!("Written {} plans to {}", results.len(), args.output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = ScenarioRunner::with_config(ProjectionConfig::from_env());

    match &cli.command {
        Commands::Run(args) => run(args, &runner),
        Commands::Batch(args) => batch(args, &runner),
    }
}
