//! Error types shared by the whole crate.
//!
//! Every fallible operation returns [`XenonError`]. Numerical failures are deterministic, so
//! nothing here is retried: the only iterative process with its own budget is the Newton
//! search of the equilibrium solver, and its exhaustion is reported as
//! [`XenonError::NonConvergence`] together with the last iterate for diagnosis.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XenonError {
    /// a physical constant or a sweep entry is not finite or not strictly positive
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },
    /// λ_I = λ_Xe makes the closed-form solution undefined
    #[error(
        "decay constants of I-135 and Xe-135 coincide (lambda = {lambda}); the analytical solution is undefined"
    )]
    DegenerateDecayConstants { lambda: f64 },
    #[error("invalid time grid: t0 = {t0}, tf = {tf}, dt = {dt}")]
    InvalidTimeGrid { t0: f64, tf: f64, dt: f64 },
    #[error("state vector has length {got}, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error(
        "equilibrium solver did not converge after {iterations} iterations: residual = {residual:e}, last iterate = {iterate:?}"
    )]
    NonConvergence {
        iterations: usize,
        residual: f64,
        iterate: Vec<f64>,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl XenonError {
    pub fn invalid_parameter(name: &str, value: f64, reason: &str) -> Self {
        XenonError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }
}
