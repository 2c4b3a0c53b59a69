use crate::Bateman::analytical_sol::{calculate_errors, calculate_rho, rho_analytical};
use crate::Bateman::equilibrium::{InitialConditions, calc_initial_conditions};
use crate::Integrators::trajectory::Trajectory;
use crate::Integrators::{IntegrationMethod, TimeIntegrator};
use crate::Parameters::{ReactorParameters, TimeGrid};
use crate::errors::XenonError;
use log::info;
use serde::{Deserialize, Deserializer, Serialize};

/// Everything computed for one flux fraction of the coarse sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub flux_per: f64,
    pub initial_conditions: InitialConditions,
    /// (t, I, Xe) from both methods, for population plots
    pub population_runge_kutta: Vec<(f64, f64, f64)>,
    pub population_matrix: Vec<(f64, f64, f64)>,
    /// (t, rho)
    pub rho_runge_kutta: Vec<(f64, f64)>,
    pub rho_matrix: Vec<(f64, f64)>,
    /// analytical poisoning at the RK4 sample times
    pub rho_analytic: Vec<f64>,
    /// relative errors, index aligned with the trajectories; `NaN` where the analytical value is
    /// zero (written as `null` in JSON)
    #[serde(deserialize_with = "nan_from_null")]
    pub error_rk4_rho: Vec<f64>,
    #[serde(deserialize_with = "nan_from_null")]
    pub error_matrix_rho: Vec<f64>,
}

/// serde_json writes non-finite floats as `null`; read them back as `NaN`
fn nan_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Poisoning surface over time × flux, computed with the matrix method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSurface {
    pub flux_percs: Vec<f64>,
    pub t: Vec<f64>,
    /// `rho[i][k]` - poisoning at flux `flux_percs[i]` and time `t[k]`
    pub rho: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub grid: TimeGrid,
    pub scenarios: Vec<ScenarioResult>,
    pub surface: ResponseSurface,
}

fn rho_series(par: &ReactorParameters, trajectory: &Trajectory) -> Vec<(f64, f64)> {
    trajectory.map_component(1, |Xe| calculate_rho(par, Xe))
}

/// Runs both integrators for flux fraction `flux_per` and compares them with the analytical
/// solution.
pub fn compute_solutions(
    par: &ReactorParameters,
    flux_per: f64,
    grid: &TimeGrid,
) -> Result<ScenarioResult, XenonError> {
    let initial_conditions = calc_initial_conditions(par, flux_per)?;
    let y0 = initial_conditions.to_dvector();
    let results_matrix =
        IntegrationMethod::matrix(par).integrate(&y0, grid.t0, grid.tf, grid.dt)?;
    let results_runge_kutta =
        IntegrationMethod::runge_kutta(par).integrate(&y0, grid.t0, grid.tf, grid.dt)?;

    let rho_matrix = rho_series(par, &results_matrix);
    let rho_runge_kutta = rho_series(par, &results_runge_kutta);

    let rho_analytic = rho_analytical(par, &results_runge_kutta.t);
    let rho_rk4: Vec<f64> = rho_runge_kutta.iter().map(|(_, rho)| *rho).collect();
    let rho_mtx: Vec<f64> = rho_matrix.iter().map(|(_, rho)| *rho).collect();
    let error_rk4_rho = calculate_errors(&rho_rk4, &rho_analytic);
    let error_matrix_rho = calculate_errors(&rho_mtx, &rho_analytic);

    Ok(ScenarioResult {
        flux_per,
        initial_conditions,
        population_runge_kutta: results_runge_kutta.populations(),
        population_matrix: results_matrix.populations(),
        rho_runge_kutta,
        rho_matrix,
        rho_analytic,
        error_rk4_rho,
        error_matrix_rho,
    })
}

/// Poisoning series from the matrix method only.
pub fn compute_matrix_only(
    par: &ReactorParameters,
    flux_per: f64,
    grid: &TimeGrid,
) -> Result<Vec<(f64, f64)>, XenonError> {
    let initial_conditions = calc_initial_conditions(par, flux_per)?;
    let results_matrix = IntegrationMethod::matrix(par).integrate(
        &initial_conditions.to_dvector(),
        grid.t0,
        grid.tf,
        grid.dt,
    )?;
    Ok(rho_series(par, &results_matrix))
}

/// Full sweep: coarse flux fractions with both methods, fine fractions for the surface.
///
/// Parameters and grid are validated before any integration starts.
pub fn process(par: &ReactorParameters, grid: &TimeGrid) -> Result<SweepResults, XenonError> {
    par.validate()?;
    grid.validate()?;

    let mut scenarios = Vec::with_capacity(par.flux_percs.len());
    for &perc in par.flux_percs.iter() {
        info!("computing scenario for flux fraction {}", perc);
        scenarios.push(compute_solutions(par, perc, grid)?);
    }

    let mut t = Vec::new();
    let mut rho = Vec::with_capacity(par.flux_percs_3d.len());
    for &perc in par.flux_percs_3d.iter() {
        let rho_matrix_3d = compute_matrix_only(par, perc, grid)?;
        if t.is_empty() {
            t = rho_matrix_3d.iter().map(|(ti, _)| *ti).collect();
        }
        rho.push(rho_matrix_3d.into_iter().map(|(_, r)| r).collect());
    }
    info!(
        "sweep finished: {} scenarios, surface {} x {}",
        scenarios.len(),
        rho.len(),
        t.len()
    );
    Ok(SweepResults {
        grid: *grid,
        scenarios,
        surface: ResponseSurface {
            flux_percs: par.flux_percs_3d.clone(),
            t,
            rho,
        },
    })
}
