//! Field Development Simulation (one-shot)
//!
//! Runs the engine once and writes the daily series to stdout, with a run
//! log on stderr. Parameters come from the config file (or built-in
//! defaults), then any per-parameter flag overrides them.
//!
//! # Usage
//! ```bash
//! ./simulation --num-rigs 3 --sim-time 10 --format csv > field.csv
//! ./simulation --format summary
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use gasfield_sim::config::FieldConfig;
use gasfield_sim::{simulate_field, SimulationParameters, SimulationResult};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON object per day (JSON lines)
    Json,
    /// CSV with a header row
    Csv,
    /// Headline figures only, as pretty JSON
    Summary,
}

#[derive(Parser, Debug)]
#[command(name = "simulation")]
#[command(about = "Staged gas field development simulation")]
#[command(version)]
struct Args {
    /// Path to a TOML config file (default search order when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Suppress the run log (only output data)
    #[arg(short, long)]
    quiet: bool,

    /// Gas price (USD/GJ)
    #[arg(long)]
    gas_price: Option<f64>,
    /// Exchange rate (AUD per USD)
    #[arg(long)]
    exchange_rate: Option<f64>,
    /// Drilling cost per well (millions)
    #[arg(long)]
    cost_to_drill: Option<f64>,
    /// Frac cost per well (millions)
    #[arg(long)]
    cost_to_frac: Option<f64>,
    /// Tie-in cost per well (millions)
    #[arg(long)]
    cost_to_tie_in: Option<f64>,
    /// Peak well rate (MMscf/day)
    #[arg(long)]
    ave_flow: Option<f64>,
    /// Years to decline to 10 % of peak
    #[arg(long)]
    ave_decline: Option<f64>,
    /// Drilling duration (days)
    #[arg(long, allow_negative_numbers = true)]
    drill_time: Option<i64>,
    /// Wait for frac crew (days)
    #[arg(long, allow_negative_numbers = true)]
    frac_wait_time: Option<i64>,
    /// Frac duration (days)
    #[arg(long, allow_negative_numbers = true)]
    frac_time: Option<i64>,
    /// Wait for pipeline tie-in (days)
    #[arg(long, allow_negative_numbers = true)]
    pipe_wait_time: Option<i64>,
    /// Wells per rig batch
    #[arg(long, allow_negative_numbers = true)]
    num_rigs: Option<i64>,
    /// Target field rate (TJ/day)
    #[arg(long)]
    tgt_flow: Option<f64>,
    /// Simulation horizon (years)
    #[arg(long)]
    sim_time: Option<f64>,
}

impl Args {
    /// Apply command-line overrides on top of the configured defaults.
    fn apply(&self, base: &SimulationParameters) -> SimulationParameters {
        SimulationParameters {
            gas_price: self.gas_price.unwrap_or(base.gas_price),
            exchange_rate: self.exchange_rate.unwrap_or(base.exchange_rate),
            cost_to_drill: self.cost_to_drill.unwrap_or(base.cost_to_drill),
            cost_to_frac: self.cost_to_frac.unwrap_or(base.cost_to_frac),
            cost_to_tie_in: self.cost_to_tie_in.unwrap_or(base.cost_to_tie_in),
            ave_flow: self.ave_flow.unwrap_or(base.ave_flow),
            ave_decline: self.ave_decline.unwrap_or(base.ave_decline),
            drill_time: self.drill_time.unwrap_or(base.drill_time),
            frac_wait_time: self.frac_wait_time.unwrap_or(base.frac_wait_time),
            frac_time: self.frac_time.unwrap_or(base.frac_time),
            pipe_wait_time: self.pipe_wait_time.unwrap_or(base.pipe_wait_time),
            num_rigs: self.num_rigs.unwrap_or(base.num_rigs),
            tgt_flow: self.tgt_flow.unwrap_or(base.tgt_flow),
            sim_time: self.sim_time.unwrap_or(base.sim_time),
        }
    }
}

// ============================================================================
// Logging Utilities
// ============================================================================

fn log_run(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

fn briefing(field: &str, p: &SimulationParameters, quiet: bool) {
    log_run(&"=".repeat(70), quiet);
    log_run("GAS FIELD DEVELOPMENT SIMULATION", quiet);
    log_run(&format!("Field: {field}"), quiet);
    log_run(&"=".repeat(70), quiet);
    log_run("ECONOMICS:", quiet);
    log_run(&format!("  Gas price: {:.2} USD/GJ @ {:.2} AUD/USD", p.gas_price, p.exchange_rate), quiet);
    log_run(
        &format!(
            "  Capex per well: drill {:.2}M, frac {:.2}M, tie-in {:.2}M",
            p.cost_to_drill, p.cost_to_frac, p.cost_to_tie_in
        ),
        quiet,
    );
    log_run("RESERVOIR:", quiet);
    log_run(&format!("  Peak well rate: {:.2} MMscf/day", p.ave_flow), quiet);
    log_run(&format!("  Decline to 10%: {:.1} years", p.ave_decline), quiet);
    log_run("CONSTRUCTION (days):", quiet);
    log_run(
        &format!(
            "  Drill {} | Frac wait {} | Frac {} | Pipe wait {}",
            p.drill_time, p.frac_wait_time, p.frac_time, p.pipe_wait_time
        ),
        quiet,
    );
    log_run(&format!("  Wells per batch: {}", p.num_rigs), quiet);
    log_run(&format!("HORIZON: {} years, target {:.1} TJ/day", p.sim_time, p.tgt_flow), quiet);
    log_run(&"=".repeat(70), quiet);
}

fn debrief(result: &SimulationResult, elapsed_secs: f64, quiet: bool) {
    let s = result.summary();
    log_run(&"=".repeat(70), quiet);
    log_run("SIMULATION COMPLETE", quiet);
    log_run(&"=".repeat(70), quiet);
    log_run(&format!("Days simulated: {}", s.total_days), quiet);
    log_run(&format!("Wells: {}", s.final_well_count), quiet);
    log_run(
        &format!("Peak field flow: {:.0} scf/day (day {})", s.peak_field_flow, s.peak_flow_day),
        quiet,
    );
    log_run(&format!("Expense: {:.0}", s.final_expense), quiet);
    log_run(&format!("Income: {:.0}", s.final_income), quiet);
    log_run(&format!("Exposure: {:.0} (low {:.0})", s.final_exposure, s.min_exposure), quiet);
    match s.payback_day {
        Some(day) => log_run(&format!("Payback: day {day}"), quiet),
        None => log_run("Payback: not reached", quiet),
    }
    match s.target_reached_day {
        Some(day) => log_run(&format!("Target flow reached: day {day}"), quiet),
        None => log_run("Target flow: not reached", quiet),
    }
    log_run(&format!("Run time: {elapsed_secs:.3}s"), quiet);
    log_run(&"=".repeat(70), quiet);
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    }

    let config = match &args.config {
        Some(path) => FieldConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FieldConfig::load(),
    };
    let params = args.apply(&config.parameters);

    briefing(&config.field.name, &params, args.quiet);

    let start = Instant::now();
    let result = simulate_field(&config.field.name, &params, config.engine)
        .context("Simulation failed")?;
    let elapsed = start.elapsed().as_secs_f64();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.format {
        OutputFormat::Json => {
            for sample in result.samples() {
                writeln!(out, "{}", serde_json::to_string(sample)?)?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "day,field_flow,expense,income,first_well_flow,exposure,well_count")?;
            for s in result.samples() {
                writeln!(
                    out,
                    "{},{:.3},{:.2},{:.2},{:.3},{:.2},{}",
                    s.day, s.field_flow, s.expense, s.income, s.first_well_flow, s.exposure, s.well_count
                )?;
            }
        }
        OutputFormat::Summary => {
            writeln!(out, "{}", serde_json::to_string_pretty(&result.summary())?)?;
        }
    }
    out.flush()?;

    debrief(&result, elapsed, args.quiet);
    Ok(())
}
