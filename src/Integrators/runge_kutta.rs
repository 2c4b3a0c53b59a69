use super::TimeIntegrator;
use super::trajectory::Trajectory;
use crate::Bateman::bateman_equations::bateman_equations;
use crate::Parameters::{ReactorParameters, TimeGrid};
use crate::errors::XenonError;
use log::debug;
use nalgebra::DVector;

/// Classical 4th order Runge-Kutta with a fixed step.
///
/// `f` maps the state to its time derivative and knows nothing about the caller's model.
/// Performs `n = floor((tf - t0)/dt)` steps
/// ```text
/// k1 = f(y)
/// k2 = f(y + dt*k1/2)
/// k3 = f(y + dt*k2/2)
/// k4 = f(y + dt*k3)
/// y_next = y + dt*(k1 + 2*k2 + 2*k3 + k4)/6
/// ```
/// and advances time by adding `dt` at each step (drift of the accumulated sum is not corrected).
///
/// # Errors
/// * `InvalidTimeGrid` - non-finite bounds, `dt <= 0`, `tf < t0` or more than
///   [`TimeGrid::MAX_STEPS`] steps
/// * `DimensionMismatch` - `f` returns a vector of a different length than `y0`
pub fn runge_kutta<F>(
    f: F,
    y0: &DVector<f64>,
    t0: f64,
    tf: f64,
    dt: f64,
) -> Result<Trajectory, XenonError>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let grid = TimeGrid::new(t0, tf, dt)?;
    let n = grid.n_steps();
    debug!("RK4: {} steps of {} s from t = {}", n, dt, t0);

    let mut t = t0;
    let mut y = y0.clone();
    let mut results = Trajectory::new(t, y.clone(), n);
    for _ in 0..n {
        let k1 = f(&y);
        if k1.len() != y.len() {
            return Err(XenonError::DimensionMismatch {
                expected: y.len(),
                got: k1.len(),
            });
        }
        let k2 = f(&(&y + &k1 * (dt / 2.0)));
        let k3 = f(&(&y + &k2 * (dt / 2.0)));
        let k4 = f(&(&y + &k3 * dt));
        y += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
        t += dt;
        results.push(t, y.clone());
    }
    Ok(results)
}

/// RK4 over the unforced Bateman equations
#[derive(Debug, Clone)]
pub struct RungeKuttaSolver {
    par: ReactorParameters,
}

impl RungeKuttaSolver {
    pub fn new(par: &ReactorParameters) -> Self {
        Self { par: par.clone() }
    }
}

impl TimeIntegrator for RungeKuttaSolver {
    fn integrate(
        &self,
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
        runge_kutta(
            |y| bateman_equations(&self.par, y, None, None),
            y0,
            t0,
            tf,
            dt,
        )
    }

    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }
}
