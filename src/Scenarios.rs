//! # Flux scenarios
//!
//! For every flux fraction of the coarse sweep: equilibrium initial conditions → RK4 and matrix
//! exponential trajectories → poisoning series → analytical poisoning at the RK4 sample times →
//! relative errors of both methods. The fine sweep runs the matrix method only and builds the
//! time × flux poisoning surface.
//!
//! Scenarios are independent of each other; the results are consumed by external reporting
//! (tables, JSON export), never fed back.

/// per-scenario computation and the full sweep
pub mod compute_solutions;
/// tables and JSON export of sweep results
pub mod output;
mod scenario_tests;
