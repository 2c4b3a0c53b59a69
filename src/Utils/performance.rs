//! Average wall-clock cost of the two integrators on the nominal-flux equilibrium.
use crate::Bateman::equilibrium::calc_initial_conditions;
use crate::Integrators::{IntegrationMethod, TimeIntegrator};
use crate::Parameters::{ReactorParameters, TimeGrid};
use crate::errors::XenonError;
use log::info;
use prettytable::{Table, row};
use std::hint::black_box;
use std::time::Instant;

pub const DEFAULT_RUNS: usize = 300;

/// Average time of one call of `method`, in milliseconds, over `runs` calls.
/// Zero runs give zero.
pub fn measure_execution_time<R, F: FnMut() -> R>(runs: usize, mut method: F) -> f64 {
    if runs == 0 {
        return 0.0;
    }
    let start = Instant::now();
    for _ in 0..runs {
        black_box(method());
    }
    start.elapsed().as_secs_f64() * 1000.0 / runs as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    pub runs: usize,
    pub rk4_ms: f64,
    pub matrix_ms: f64,
}

impl PerformanceReport {
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Method", "runs", "average time, ms"]);
        table.add_row(row!["RK4", self.runs, format!("{:.4}", self.rk4_ms)]);
        table.add_row(row![
            "matrix exponential",
            self.runs,
            format!("{:.4}", self.matrix_ms)
        ]);
        table
    }
}

/// Times both integrators on the nominal equilibrium over `grid`.
///
/// One checked run of each method goes first so that a bad grid fails before the timing loop.
pub fn estimate_execution_time(
    par: &ReactorParameters,
    grid: &TimeGrid,
    runs: usize,
) -> Result<PerformanceReport, XenonError> {
    par.validate()?;
    grid.validate()?;
    let y0 = calc_initial_conditions(par, 1.0)?.to_dvector();
    let rk4 = IntegrationMethod::runge_kutta(par);
    let matrix = IntegrationMethod::matrix(par);
    rk4.integrate(&y0, grid.t0, grid.tf, grid.dt)?;
    matrix.integrate(&y0, grid.t0, grid.tf, grid.dt)?;

    let rk4_ms = measure_execution_time(runs, || rk4.integrate(&y0, grid.t0, grid.tf, grid.dt));
    let matrix_ms =
        measure_execution_time(runs, || matrix.integrate(&y0, grid.t0, grid.tf, grid.dt));
    info!(
        "average over {} runs: RK4 {:.4} ms, matrix {:.4} ms",
        runs, rk4_ms, matrix_ms
    );
    Ok(PerformanceReport {
        runs,
        rk4_ms,
        matrix_ms,
    })
}
