use crate::Parameters::{ReactorParameters, TimeGrid};
use crate::Scenarios::compute_solutions::process;
use crate::Utils::performance::{DEFAULT_RUNS, estimate_execution_time};
use crate::errors::XenonError;
use clap::Parser;
use log::{LevelFilter, info};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "XeTransient")]
#[command(about = "I-135 / Xe-135 transient after a flux change: RK4 vs matrix exponential vs closed form")]
pub struct Args {
    /// Start and end of the simulated interval, seconds
    #[arg(
        long,
        num_args = 2,
        value_names = ["T0", "TF"],
        allow_negative_numbers = true,
        default_values_t = [0.0, 252000.0]
    )]
    pub time_range: Vec<f64>,

    /// Time step, seconds
    #[arg(long, allow_negative_numbers = true, default_value_t = 3600.0)]
    pub dt: f64,

    /// Only time both integrators and print the averages
    #[arg(long)]
    pub performance: bool,

    /// Number of timed runs in performance mode
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Reactor parameters as JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write sweep results as JSON
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn time_grid(&self) -> Result<TimeGrid, XenonError> {
        match self.time_range.as_slice() {
            [t0, tf] => TimeGrid::new(*t0, *tf, self.dt),
            other => Err(XenonError::DimensionMismatch {
                expected: 2,
                got: other.len(),
            }),
        }
    }

    pub fn parameters(&self) -> Result<ReactorParameters, XenonError> {
        let par = match &self.config {
            Some(path) => ReactorParameters::from_file(path)?,
            None => ReactorParameters::default(),
        };
        par.validate()?;
        Ok(par)
    }
}

/// Runs either the timing mode or the full flux sweep with tables and optional JSON export.
pub fn run(args: &Args) -> Result<(), XenonError> {
    let par = args.parameters()?;
    let grid = args.time_grid()?;
    if args.performance {
        info!("performance mode, {} runs per method", args.runs);
        let report = estimate_execution_time(&par, &grid, args.runs)?;
        report.table().printstd();
        return Ok(());
    }
    par.pretty_print();
    let results = process(&par, &grid)?;
    results.pretty_print();
    if let Some(table) = par
        .nominal_index()
        .and_then(|index| results.error_table(index, 10))
    {
        println!("\n=== RELATIVE ERROR ON RHO, NOMINAL FLUX ===");
        table.printstd();
    }
    if let Some(path) = &args.output {
        results.save_to_file(path)?;
    }
    Ok(())
}
