//! # Reactor parameters
//!
//! Physical constants of the I-135 / Xe-135 problem and the two sweeps of flux fractions
//! (coarse one for the time series and error comparison, fine one for the time × flux
//! response surface), plus the time grid shared by both integrators.
//!
//! [`ReactorParameters`] is built once (from [`Default`] or from a JSON file), validated and then
//! passed by reference to every component; nothing in the crate mutates it.
//!
//! | Field      | Meaning                                             | Default    | Units      |
//! |------------|-----------------------------------------------------|------------|------------|
//! | gamma_I    | fission yield of I-135                              | 0.061      | -          |
//! | Sigma_f    | macroscopic fission cross-section                   | 0.008      | cm^-1      |
//! | lambda_I   | decay constant of I-135                             | 2.874e-5   | s^-1       |
//! | gamma_Xe   | fission yield of Xe-135                             | 0.003      | -          |
//! | lambda_Xe  | decay constant of Xe-135                            | 2.027e-5   | s^-1       |
//! | sigma_Xe   | microscopic absorption cross-section of Xe-135      | 2.75e-18   | cm^2       |
//! | Phi        | nominal thermal neutron flux                        | 4.42e20    | cm^-2 s^-1 |
//! | nu         | neutrons released per fission                       | 2.3        | -          |
use crate::errors::XenonError;
use log::{info, warn};
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// evenly spaced values from `start` to `stop` inclusive
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorParameters {
    pub gamma_I: f64,
    pub Sigma_f: f64,
    pub lambda_I: f64,
    pub gamma_Xe: f64,
    pub lambda_Xe: f64,
    pub sigma_Xe: f64,
    pub Phi: f64,
    pub nu: f64,
    /// flux fractions used for the poisoning time series and the error analysis
    pub flux_percs: Vec<f64>,
    /// flux fractions used for the xenon transient surface
    pub flux_percs_3d: Vec<f64>,
}

impl Default for ReactorParameters {
    fn default() -> Self {
        Self {
            gamma_I: 0.061,
            Sigma_f: 0.008,
            lambda_I: 2.874E-5,
            gamma_Xe: 0.003,
            lambda_Xe: 2.027E-5,
            sigma_Xe: 2.75E-18,
            Phi: 4.42E20,
            nu: 2.3,
            // 100% down to 20% with 20% intervals
            flux_percs: linspace(10.0, 2.0, 5).iter().map(|x| x / 10.0).collect(),
            // 120% down to 80% with 4% intervals
            flux_percs_3d: linspace(120.0, 80.0, 11)
                .iter()
                .map(|x| x / 100.0)
                .collect(),
        }
    }
}

impl ReactorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that the record is physically consistent. Must pass before any integration starts.
    ///
    /// # Errors
    /// * `InvalidParameter` - a constant or a sweep entry is NaN, infinite or not strictly positive,
    ///   or a sweep is empty
    /// * `DegenerateDecayConstants` - λ_I = λ_Xe (division by zero in the closed-form solution)
    pub fn validate(&self) -> Result<(), XenonError> {
        let constants = [
            ("gamma_I", self.gamma_I),
            ("Sigma_f", self.Sigma_f),
            ("lambda_I", self.lambda_I),
            ("gamma_Xe", self.gamma_Xe),
            ("lambda_Xe", self.lambda_Xe),
            ("sigma_Xe", self.sigma_Xe),
            ("Phi", self.Phi),
            ("nu", self.nu),
        ];
        for (name, value) in constants {
            check_positive(name, value)?;
        }
        if self.lambda_I == self.lambda_Xe {
            return Err(XenonError::DegenerateDecayConstants {
                lambda: self.lambda_I,
            });
        }
        for (name, sweep) in [
            ("flux_percs", &self.flux_percs),
            ("flux_percs_3d", &self.flux_percs_3d),
        ] {
            if sweep.is_empty() {
                return Err(XenonError::invalid_parameter(
                    name,
                    0.0,
                    "flux sweep must not be empty",
                ));
            }
            for &f in sweep.iter() {
                check_positive(name, f)?;
            }
        }
        info!("reactor parameters checked!");
        Ok(())
    }

    /// parses and validates parameters from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, XenonError> {
        let params: ReactorParameters = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// reads and validates parameters from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, XenonError> {
        let content = fs::read_to_string(path.as_ref())?;
        info!("loading reactor parameters from {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), XenonError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// macroscopic fission rate density Σ_f·Φ at flux fraction `flux_per`
    pub fn fission_rate(&self, flux_per: f64) -> f64 {
        self.Sigma_f * flux_per * self.Phi
    }

    /// position of the nominal flux (1.0) in the coarse sweep, the scenario whose error series is printed
    pub fn nominal_index(&self) -> Option<usize> {
        let idx = self.flux_percs.iter().position(|&f| f == 1.0);
        if idx.is_none() {
            warn!("nominal flux (1.0) is not part of the coarse sweep");
        }
        idx
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["Fission yield I-135 (gamma_I)", format!("{:.4}", self.gamma_I), "-"]);
        table.add_row(row![
            "Fission cross-section (Sigma_f)",
            format!("{:.4}", self.Sigma_f),
            "cm^-1"
        ]);
        table.add_row(row!["Decay constant I-135 (lambda_I)", format!("{:.4e}", self.lambda_I), "s^-1"]);
        table.add_row(row!["Fission yield Xe-135 (gamma_Xe)", format!("{:.4}", self.gamma_Xe), "-"]);
        table.add_row(row![
            "Decay constant Xe-135 (lambda_Xe)",
            format!("{:.4e}", self.lambda_Xe),
            "s^-1"
        ]);
        table.add_row(row![
            "Absorption cross-section Xe-135 (sigma_Xe)",
            format!("{:.3e}", self.sigma_Xe),
            "cm^2"
        ]);
        table.add_row(row!["Thermal flux (Phi)", format!("{:.3e}", self.Phi), "cm^-2 s^-1"]);
        table.add_row(row!["Neutrons per fission (nu)", format!("{:.2}", self.nu), "-"]);
        table.add_row(row!["Flux sweep", format!("{:?}", self.flux_percs), "-"]);
        table.add_row(row!["Surface flux sweep", format!("{:?}", self.flux_percs_3d), "-"]);
        table.printstd();
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), XenonError> {
    if !value.is_finite() {
        return Err(XenonError::invalid_parameter(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(XenonError::invalid_parameter(
            name,
            value,
            "must be strictly positive",
        ));
    }
    Ok(())
}

/// Simulation time range and fixed step, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub t0: f64,
    pub tf: f64,
    pub dt: f64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            t0: 0.0,
            tf: 252000.0,
            dt: 3600.0,
        }
    }
}

impl TimeGrid {
    /// upper bound on the number of steps of one run
    pub const MAX_STEPS: usize = 10_000_000;

    pub fn new(t0: f64, tf: f64, dt: f64) -> Result<Self, XenonError> {
        let grid = Self { t0, tf, dt };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), XenonError> {
        let finite = self.t0.is_finite() && self.tf.is_finite() && self.dt.is_finite();
        // (tf - t0) overflows for bounds of opposite sign near f64::MAX
        let steps = (self.tf - self.t0) / self.dt;
        if !finite
            || self.dt <= 0.0
            || self.tf < self.t0
            || !steps.is_finite()
            || steps > Self::MAX_STEPS as f64
        {
            return Err(XenonError::InvalidTimeGrid {
                t0: self.t0,
                tf: self.tf,
                dt: self.dt,
            });
        }
        Ok(())
    }

    /// n = floor((tf - t0)/dt)
    pub fn n_steps(&self) -> usize {
        ((self.tf - self.t0) / self.dt).floor() as usize
    }
}
