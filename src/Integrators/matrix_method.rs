use super::TimeIntegrator;
use super::trajectory::Trajectory;
use crate::Bateman::bateman_equations::system_matrix;
use crate::Parameters::{ReactorParameters, TimeGrid};
use crate::errors::XenonError;
use log::debug;
use nalgebra::{DVector, Matrix2, Vector2};

/// State-transition matrix `exp(dt*A)` of the unforced system over one step.
pub fn transition_matrix(par: &ReactorParameters, dt: f64) -> Matrix2<f64> {
    (system_matrix(par) * dt).exp()
}

/// Propagates `y0` through the unforced linear system with the matrix exponential.
///
/// `exp(dt*A)` is computed once and applied `n = floor((tf - t0)/dt)` times; time advances by
/// adding `dt`. External sources can not be represented here, so this method does not apply to
/// the forced system of the equilibrium search.
///
/// # Errors
/// * `InvalidTimeGrid` - non-finite bounds, `dt <= 0`, `tf < t0` or more than
///   [`TimeGrid::MAX_STEPS`] steps
/// * `DimensionMismatch` - `y0` is not a two-component state
pub fn matrix_method(
    par: &ReactorParameters,
    y0: &DVector<f64>,
    t0: f64,
    tf: f64,
    dt: f64,
) -> Result<Trajectory, XenonError> {
    if y0.len() != 2 {
        return Err(XenonError::DimensionMismatch {
            expected: 2,
            got: y0.len(),
        });
    }
    let grid = TimeGrid::new(t0, tf, dt)?;
    let n = grid.n_steps();
    let matrix_exp = transition_matrix(par, dt);
    debug!("matrix method: {} steps, exp(dt*A) = {}", n, matrix_exp);

    let mut t = t0;
    let mut y = Vector2::new(y0[0], y0[1]);
    let mut results = Trajectory::new(t, y0.clone(), n);
    for _ in 0..n {
        y = matrix_exp * y;
        t += dt;
        results.push(t, DVector::from_column_slice(y.as_slice()));
    }
    Ok(results)
}

/// Matrix-exponential propagator bound to a parameter set
#[derive(Debug, Clone)]
pub struct MatrixMethodSolver {
    par: ReactorParameters,
}

impl MatrixMethodSolver {
    pub fn new(par: &ReactorParameters) -> Self {
        Self { par: par.clone() }
    }
}

impl TimeIntegrator for MatrixMethodSolver {
    fn integrate(
        &self,
        y0: &DVector<f64>,
        t0: f64,
        tf: f64,
        dt: f64,
    ) -> Result<Trajectory, XenonError> {
        matrix_method(&self.par, y0, t0, tf, dt)
    }

    fn name(&self) -> &'static str {
        "matrix exponential"
    }
}
