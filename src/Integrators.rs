//! # Fixed-step time integrators
//!
//! Two ways to propagate the unforced Bateman system from the equilibrium state:
//!
//! - **`runge_kutta`**: classical explicit 4-stage Runge-Kutta over any derivative closure and any
//!   state length. 4th order accurate, error shrinks as dt^4.
//! - **`matrix_method`**: the system is linear, so one step is `y_{k+1} = exp(dt*A)*y_k`. The
//!   state-transition matrix is computed once; the method is exact up to floating point rounding.
//!
//! Both return a [`trajectory::Trajectory`] with `floor((tf - t0)/dt) + 1` samples, the initial
//! state first, time accumulated by adding `dt` at each step.
//!
//! [`TimeIntegrator`] puts both schemes behind one interface; [`IntegrationMethod`] dispatches
//! statically between them.
use crate::Parameters::ReactorParameters;
use crate::errors::XenonError;
use enum_dispatch::enum_dispatch;
use nalgebra::DVector;

pub mod matrix_method;
pub mod runge_kutta;
pub mod trajectory;

use matrix_method::MatrixMethodSolver;
use runge_kutta::RungeKuttaSolver;
use trajectory::Trajectory;

/// A scheme that propagates the unforced I/Xe system over a fixed time grid.
#[enum_dispatch]
pub trait TimeIntegrator {
    fn integrate(
        &self,
        y0: &DVector<f64>,
        t0: f64,
        tf: f64,
        dt: f64,
    ) -> Result<Trajectory, XenonError>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
#[enum_dispatch(TimeIntegrator)]
pub enum IntegrationMethod {
    RungeKutta(RungeKuttaSolver),
    Matrix(MatrixMethodSolver),
}

impl IntegrationMethod {
    pub fn runge_kutta(par: &ReactorParameters) -> Self {
        IntegrationMethod::RungeKutta(RungeKuttaSolver::new(par))
    }

    pub fn matrix(par: &ReactorParameters) -> Self {
        IntegrationMethod::Matrix(MatrixMethodSolver::new(par))
    }
}
