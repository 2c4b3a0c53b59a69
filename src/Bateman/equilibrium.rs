//! Equilibrium initial conditions.
//!
//! For a flux fraction f the steady state (I0, Xe0) makes the Bateman right-hand side vanish
//! under the flux-scaled sources. The xenon source depends on Xe0 itself, so the two residuals
//! are assembled symbolically and handed to the damped Newton-Raphson solver of RustedSciThe
//! (symbolic Jacobian, LU step) with an explicit iteration budget.
//!
//! The search starts from `[1e21, 1e14]`; these orders of magnitude matter, the iteration is not
//! guaranteed to converge from arbitrary starting points. If the budget is exhausted the solver
//! fails with [`XenonError::NonConvergence`] and reports the last iterate instead of returning it
//! as if it were an equilibrium.
use super::bateman_equations::bateman_equations_sym;
use crate::Parameters::ReactorParameters;
use crate::errors::XenonError;
use RustedSciThe::numerical::Nonlinear_systems::NR::NR;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::{debug, info};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// names of the unknowns in the symbolic residuals
const UNKNOWNS: [&str; 2] = ["I", "Xe"];

/// Steady-state concentrations before the flux transient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub I0: f64,
    pub Xe0: f64,
}

impl InitialConditions {
    pub fn to_dvector(&self) -> DVector<f64> {
        DVector::from_vec(vec![self.I0, self.Xe0])
    }
}

/// Newton-Raphson solver for the equilibrium problem
#[derive(Debug, Clone)]
pub struct EquilibriumSolver {
    /// starting point [I, Xe]
    pub initial_guess: Vec<f64>,
    /// bound on the euclidean norm of the residual, relative to the total fission production of
    /// iodine and xenon
    pub tolerance: f64,
    pub max_iterations: usize,
    /// step multiplier in (0, 1]
    pub damping_factor: f64,
}

impl Default for EquilibriumSolver {
    fn default() -> Self {
        Self {
            initial_guess: vec![1E21, 1E14],
            tolerance: 1e-10,
            max_iterations: 100,
            damping_factor: 1.0,
        }
    }
}

impl EquilibriumSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_solver_params(
        &mut self,
        initial_guess: Option<Vec<f64>>,
        tolerance: f64,
        max_iterations: usize,
        damping_factor: Option<f64>,
    ) {
        if let Some(guess) = initial_guess {
            self.initial_guess = guess;
        }
        self.tolerance = tolerance;
        self.max_iterations = max_iterations;
        self.damping_factor = damping_factor.unwrap_or(1.0);
    }

    pub fn check_task(&self) -> Result<(), XenonError> {
        if self.initial_guess.len() != UNKNOWNS.len() {
            return Err(XenonError::DimensionMismatch {
                expected: UNKNOWNS.len(),
                got: self.initial_guess.len(),
            });
        }
        if let Some(bad) = self.initial_guess.iter().find(|x| !x.is_finite()) {
            return Err(XenonError::invalid_parameter(
                "initial_guess",
                *bad,
                "must be finite",
            ));
        }
        if self.max_iterations == 0 {
            return Err(XenonError::invalid_parameter(
                "max_iterations",
                0.0,
                "at least one Newton step is required",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(XenonError::invalid_parameter(
                "tolerance",
                self.tolerance,
                "must be strictly positive",
            ));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(XenonError::invalid_parameter(
                "damping_factor",
                self.damping_factor,
                "must lie in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Residuals of the equilibrium problem in the unknowns `I`, `Xe`.
    pub fn residuals_sym(par: &ReactorParameters, flux_per: f64) -> Vec<Expr> {
        let I = Expr::Var(UNKNOWNS[0].to_owned());
        let Xe = Expr::Var(UNKNOWNS[1].to_owned());
        let fission_rate = par.fission_rate(flux_per);
        let a = Expr::Const(par.gamma_I * fission_rate);
        let b = Expr::Const(par.gamma_Xe * fission_rate)
            - Expr::Const(par.sigma_Xe * flux_per * par.Phi) * Xe.clone();
        bateman_equations_sym(par, I, Xe, a, b)
    }

    /// Finds (I0, Xe0) for the flux fraction `flux_per` (1.0 = nominal flux).
    ///
    /// The residuals are divided by the total fission production of iodine and xenon before they
    /// go to the Newton-Raphson solver, so `tolerance` bounds a dimensionless residual norm. With
    /// validated parameters the Jacobian determinant is `lambda_I*(lambda_Xe + sigma_Xe*f*Phi) > 0`.
    ///
    /// # Errors
    /// * `InvalidParameter` - `flux_per` is not finite and strictly positive, bad solver settings or
    ///   bad reactor parameters
    /// * `NonConvergence` - the residual is still above tolerance after `max_iterations` steps
    pub fn solve(
        &self,
        par: &ReactorParameters,
        flux_per: f64,
    ) -> Result<InitialConditions, XenonError> {
        self.check_task()?;
        if !(flux_per.is_finite() && flux_per > 0.0) {
            return Err(XenonError::invalid_parameter(
                "flux_per",
                flux_per,
                "flux fraction must be finite and strictly positive",
            ));
        }
        par.validate()?;
        let scale = (par.gamma_I + par.gamma_Xe) * par.fission_rate(flux_per);
        let residuals: Vec<Expr> = Self::residuals_sym(par, flux_per)
            .into_iter()
            .map(|eq| eq * Expr::Const(1.0 / scale))
            .collect();
        let unknowns: Vec<String> = UNKNOWNS.iter().map(|x| x.to_string()).collect();

        let mut solver = NR::new();
        solver.set_equation_system(
            residuals,
            Some(unknowns),
            self.initial_guess.clone(),
            self.tolerance,
            self.max_iterations,
        );
        solver.set_solver_params(
            Some("none".to_string()),
            None,
            Some(self.damping_factor),
            None,
            None,
            None,
        );
        solver.eq_generate();
        match solver.solve() {
            Some(solution) => {
                info!(
                    "equilibrium for flux fraction {} found in {} iterations: I0 = {:e}, Xe0 = {:e}",
                    flux_per, solver.i, solution[0], solution[1]
                );
                Ok(InitialConditions {
                    I0: solution[0],
                    Xe0: solution[1],
                })
            }
            None => {
                debug!(
                    "equilibrium search for flux fraction {} stopped at {:?}",
                    flux_per, solver.y
                );
                Err(XenonError::NonConvergence {
                    iterations: solver.i,
                    residual: solver.max_error,
                    iterate: solver.y.iter().cloned().collect(),
                })
            }
        }
    }
}

/// Equilibrium initial conditions with the default solver settings.
pub fn calc_initial_conditions(
    par: &ReactorParameters,
    flux_per: f64,
) -> Result<InitialConditions, XenonError> {
    EquilibriumSolver::new().solve(par, flux_per)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bateman::bateman_equations::{bateman_equations, source_terms};
    use approx::assert_relative_eq;

    /// closed-form steady state, for reference
    fn exact_equilibrium(par: &ReactorParameters, f: f64) -> (f64, f64) {
        let R = par.fission_rate(f);
        let I0 = par.gamma_I * R / par.lambda_I;
        let Xe0 = (par.gamma_I + par.gamma_Xe) * R / (par.lambda_Xe + par.sigma_Xe * f * par.Phi);
        (I0, Xe0)
    }

    #[test]
    fn test_nominal_equilibrium() {
        let par = ReactorParameters::default();
        let ic = calc_initial_conditions(&par, 1.0).unwrap();
        let (I0, Xe0) = exact_equilibrium(&par, 1.0);
        assert_relative_eq!(ic.I0, I0, max_relative = 1e-9);
        assert_relative_eq!(ic.Xe0, Xe0, max_relative = 1e-9);
        assert_relative_eq!(ic.I0, 7.505080027835769e21, max_relative = 1e-9);
        assert_relative_eq!(ic.Xe0, 1.861818150770009e14, max_relative = 1e-9);
    }

    #[test]
    fn test_derivative_vanishes_for_all_sweeps() {
        let par = ReactorParameters::default();
        let sweeps: Vec<f64> = par
            .flux_percs
            .iter()
            .chain(par.flux_percs_3d.iter())
            .cloned()
            .chain([0.01, 3.0])
            .collect();
        for f in sweeps {
            let ic = calc_initial_conditions(&par, f).unwrap();
            let (a, b) = source_terms(&par, f, ic.Xe0);
            let dy = bateman_equations(&par, &ic.to_dvector(), Some(a), Some(b));
            let scale = (par.gamma_I + par.gamma_Xe) * par.fission_rate(f);
            assert!(dy[0].abs() / scale < 1e-9, "dI/dt = {} at f = {}", dy[0], f);
            assert!(dy[1].abs() / scale < 1e-9, "dXe/dt = {} at f = {}", dy[1], f);
            assert!(ic.I0 > 0.0 && ic.Xe0 > 0.0);
        }
    }

    #[test]
    fn test_damped_newton_converges() {
        let par = ReactorParameters::default();
        let mut solver = EquilibriumSolver::new();
        solver.set_solver_params(None, 1e-10, 200, Some(0.5));
        let ic = solver.solve(&par, 0.8).unwrap();
        let (I0, Xe0) = exact_equilibrium(&par, 0.8);
        assert_relative_eq!(ic.I0, I0, max_relative = 1e-8);
        assert_relative_eq!(ic.Xe0, Xe0, max_relative = 1e-8);
    }

    #[test]
    fn test_non_convergence_is_reported() {
        let par = ReactorParameters::default();
        let mut solver = EquilibriumSolver::new();
        // heavy damping: every step only covers a tenth of the way
        solver.set_solver_params(None, 1e-10, 5, Some(0.1));
        match solver.solve(&par, 1.0) {
            Err(XenonError::NonConvergence {
                iterations,
                residual,
                iterate,
            }) => {
                assert_eq!(iterations, 5);
                assert!(residual > 1e-10);
                assert_eq!(iterate.len(), 2);
                // the problem is linear, so the iterate is 0.9^5 of the way from the guess
                let (I0, Xe0) = exact_equilibrium(&par, 1.0);
                let left = 0.9_f64.powi(5);
                assert_relative_eq!(iterate[0], I0 + left * (1E21 - I0), max_relative = 1e-9);
                assert_relative_eq!(iterate[1], Xe0 + left * (1E14 - Xe0), max_relative = 1e-9);
            }
            other => panic!("expected NonConvergence, got {:?}", other),
        }

        // one undamped step lands on the equilibrium but is not confirmed within the budget
        solver.set_solver_params(None, 1e-10, 1, None);
        assert!(matches!(
            solver.solve(&par, 1.0),
            Err(XenonError::NonConvergence { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_input() {
        let par = ReactorParameters::default();
        assert!(calc_initial_conditions(&par, 0.0).is_err());
        assert!(calc_initial_conditions(&par, -1.0).is_err());
        assert!(calc_initial_conditions(&par, f64::NAN).is_err());

        let mut solver = EquilibriumSolver::new();
        solver.initial_guess = vec![1.0];
        assert!(matches!(
            solver.solve(&par, 1.0),
            Err(XenonError::DimensionMismatch { expected: 2, got: 1 })
        ));
        let mut solver = EquilibriumSolver::new();
        solver.damping_factor = 1.5;
        assert!(solver.solve(&par, 1.0).is_err());
        let mut solver = EquilibriumSolver::new();
        solver.set_solver_params(None, 1e-10, 0, None);
        assert!(matches!(
            solver.solve(&par, 1.0),
            Err(XenonError::InvalidParameter { ref name, .. }) if name == "max_iterations"
        ));
        let mut solver = EquilibriumSolver::new();
        solver.initial_guess = vec![f64::NAN, 1E14];
        assert!(matches!(
            solver.solve(&par, 1.0),
            Err(XenonError::InvalidParameter { ref name, .. }) if name == "initial_guess"
        ));
        let mut bad_par = ReactorParameters::default();
        bad_par.sigma_Xe = -1.0;
        assert!(EquilibriumSolver::new().solve(&bad_par, 1.0).is_err());
    }

    #[test]
    fn test_idempotent() {
        let par = ReactorParameters::default();
        let first = calc_initial_conditions(&par, 0.6).unwrap();
        let second = calc_initial_conditions(&par, 0.6).unwrap();
        assert_eq!(first.I0.to_bits(), second.I0.to_bits());
        assert_eq!(first.Xe0.to_bits(), second.Xe0.to_bits());
    }
}
