//! # Bateman equations for the I-135 / Xe-135 chain
//!
//! ```text
//! dI/dt  = a - lambda_I*I
//! dXe/dt = lambda_I*I - lambda_Xe*Xe + b
//! ```
//! `a` is the external (fission) production of iodine, `b` the net external production/loss of
//! xenon. After a flux change to zero both sources vanish and the system is linear:
//! `dy/dt = A*y` with `A = [[-lambda_I, 0], [lambda_I, -lambda_Xe]]`.
//!
//! Before the transient the reactor sits at equilibrium for a given flux fraction f:
//! ```text
//! a = gamma_I*Sigma_f*f*Phi
//! b = gamma_Xe*Sigma_f*f*Phi - sigma_Xe*Xe0*f*Phi
//! ```
//! and `b` depends on the unknown `Xe0`, so the initial conditions come out of a small nonlinear
//! root search (Newton-Raphson with symbolic Jacobian from [RustedSciThe](https://crates.io/crates/RustedSciThe)).
//!
//! The closed-form xenon concentration after shutdown from nominal equilibrium, the poisoning
//! transform and the relative errors used to validate both integrators live in `analytical_sol`.

/// right-hand side of the Bateman equations (numeric and symbolic) and the linear system matrix
pub mod bateman_equations;
/// equilibrium (steady-state) initial conditions for a given flux fraction
pub mod equilibrium;
/// closed-form xenon concentration, poisoning and relative errors
pub mod analytical_sol;
