//! Formatted output of sweep results: summary tables with prettytable and JSON export for the
//! plotting side.
use super::compute_solutions::{ScenarioResult, SweepResults};
use crate::Bateman::analytical_sol::max_abs_error;
use crate::errors::XenonError;
use log::info;
use prettytable::{Cell, Row, Table, row};
use std::fs;
use std::path::Path;

impl ScenarioResult {
    /// poisoning at the end of the run, (RK4, matrix, analytical)
    pub fn final_rho(&self) -> Option<(f64, f64, f64)> {
        let rk = self.rho_runge_kutta.last()?.1;
        let mx = self.rho_matrix.last()?.1;
        let ana = *self.rho_analytic.last()?;
        Some((rk, mx, ana))
    }
}

impl SweepResults {
    /// one row per scenario: initial conditions, final poisoning of both methods, worst errors
    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            "Flux, %",
            "I0",
            "Xe0",
            "rho RK4 (tf)",
            "rho matrix (tf)",
            "rho analytic (tf)",
            "max |err| RK4",
            "max |err| matrix"
        ]);
        for scenario in &self.scenarios {
            let (rk, mx, ana) = scenario
                .final_rho()
                .unwrap_or((f64::NAN, f64::NAN, f64::NAN));
            let fmt_err = |e: Option<f64>| e.map_or("-".to_string(), |e| format!("{:.3e}", e));
            table.add_row(row![
                format!("{:.0}", 100.0 * scenario.flux_per),
                format!("{:.4e}", scenario.initial_conditions.I0),
                format!("{:.4e}", scenario.initial_conditions.Xe0),
                format!("{:.6e}", rk),
                format!("{:.6e}", mx),
                format!("{:.6e}", ana),
                fmt_err(max_abs_error(&scenario.error_rk4_rho)),
                fmt_err(max_abs_error(&scenario.error_matrix_rho))
            ]);
        }
        table
    }

    /// poisoning surface sampled every `every` time steps
    pub fn surface_table(&self, every: usize) -> Table {
        let every = every.max(1);
        let mut table = Table::new();
        let mut header = vec!["t, h".to_string()];
        header.extend(
            self.surface
                .flux_percs
                .iter()
                .map(|f| format!("{:.0}%", 100.0 * f)),
        );
        table.add_row(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
        for (k, t) in self.surface.t.iter().enumerate().step_by(every) {
            let mut line = vec![format!("{:.1}", t / 3600.0)];
            line.extend(self.surface.rho.iter().map(|rho| format!("{:.4e}", rho[k])));
            table.add_row(Row::new(line.iter().map(|c| Cell::new(c)).collect()));
        }
        table
    }

    /// Relative errors of both methods along the scenario `index`, usually the nominal flux.
    ///
    /// The first sample is left out: both methods start from the same equilibrium, so the error
    /// there says nothing about the integrators.
    pub fn error_table(&self, index: usize, every: usize) -> Option<Table> {
        let scenario = self.scenarios.get(index)?;
        let mut table = Table::new();
        table.add_row(row!["t, h", "err RK4", "err matrix"]);
        let rows = scenario
            .rho_runge_kutta
            .iter()
            .zip(scenario.error_rk4_rho.iter())
            .zip(scenario.error_matrix_rho.iter())
            .skip(1)
            .step_by(every.max(1));
        for (((t, _), err_rk4), err_matrix) in rows {
            table.add_row(row![
                format!("{:.1}", t / 3600.0),
                format!("{:.3e}", err_rk4),
                format!("{:.3e}", err_matrix)
            ]);
        }
        Some(table)
    }

    pub fn pretty_print(&self) {
        println!("\n=== XENON TRANSIENT: POISONING BY FLUX ===");
        println!(
            "time range: {} .. {} s, dt = {} s",
            self.grid.t0, self.grid.tf, self.grid.dt
        );
        self.summary_table().printstd();
        println!("\n=== XENON TRANSIENT SURFACE (matrix method) ===");
        self.surface_table(10).printstd();
    }

    pub fn to_json(&self) -> Result<String, XenonError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), XenonError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!("sweep results written to {}", path.as_ref().display());
        Ok(())
    }
}
