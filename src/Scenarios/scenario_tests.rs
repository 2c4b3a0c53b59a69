#[cfg(test)]
mod tests {
    use crate::Parameters::{ReactorParameters, TimeGrid};
    use crate::Scenarios::compute_solutions::{
        SweepResults, compute_matrix_only, compute_solutions, process,
    };
    use crate::errors::XenonError;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    fn short_grid() -> TimeGrid {
        TimeGrid::new(0.0, 72000.0, 3600.0).unwrap()
    }

    #[test]
    fn test_nominal_scenario() {
        let par = ReactorParameters::default();
        let grid = TimeGrid::default();
        let res = compute_solutions(&par, 1.0, &grid).unwrap();
        assert_eq!(res.rho_runge_kutta.len(), 71);
        assert_eq!(res.rho_matrix.len(), 71);
        assert_eq!(res.rho_analytic.len(), 71);
        assert_eq!(res.error_rk4_rho.len(), 71);
        assert_eq!(res.error_matrix_rho.len(), 71);
        assert_eq!(res.population_matrix.len(), 71);
        assert_eq!(res.population_runge_kutta[0].0, 0.0);
        assert_eq!(res.population_runge_kutta[0].1, res.initial_conditions.I0);
        assert_eq!(res.population_runge_kutta[0].2, res.initial_conditions.Xe0);
        // at nominal flux the unforced decay from equilibrium is the analytical case
        for e in res.error_rk4_rho.iter().chain(res.error_matrix_rho.iter()) {
            assert!(e.is_finite() && e.abs() < 1e-5, "error = {}", e);
        }
        let (rk, mx, ana) = res.final_rho().unwrap();
        assert_relative_eq!(rk, mx, max_relative = 1e-6);
        assert_relative_eq!(mx, ana, max_relative = 1e-8);
    }

    #[test]
    fn test_reduced_flux_scenario() {
        let par = ReactorParameters::default();
        let res = compute_solutions(&par, 0.6, &short_grid()).unwrap();
        // burnup dominates the equilibrium xenon, so the starting point barely depends on flux
        assert!(res.error_matrix_rho[0].abs() < 1e-6);
        // the iodine inventory scales with flux and takes over within hours
        assert_relative_eq!(res.error_matrix_rho[5], 0.4, max_relative = 1e-3);
        assert_relative_eq!(res.error_matrix_rho[20], 0.4, max_relative = 1e-3);
        let nominal = compute_solutions(&par, 1.0, &short_grid()).unwrap();
        assert!(res.rho_matrix[5].1 < nominal.rho_matrix[5].1);
    }

    #[test]
    fn test_matrix_only_matches_full_run() {
        let par = ReactorParameters::default();
        let grid = short_grid();
        let full = compute_solutions(&par, 0.8, &grid).unwrap();
        let matrix_only = compute_matrix_only(&par, 0.8, &grid).unwrap();
        assert_eq!(full.rho_matrix, matrix_only);
    }

    #[test]
    fn test_process_sweep() {
        let par = ReactorParameters::default();
        let grid = short_grid();
        let sweep = process(&par, &grid).unwrap();
        assert_eq!(sweep.scenarios.len(), 5);
        assert_eq!(sweep.surface.flux_percs.len(), 11);
        assert_eq!(sweep.surface.rho.len(), 11);
        assert_eq!(sweep.surface.t.len(), 21);
        for row in sweep.surface.rho.iter() {
            assert_eq!(row.len(), 21);
        }
        // higher flux, more poisoning once the iodine starts decaying
        for k in 1..sweep.surface.t.len() {
            for i in 1..sweep.surface.rho.len() {
                assert!(sweep.surface.rho[i - 1][k] > sweep.surface.rho[i][k]);
            }
        }
        let summary = sweep.summary_table();
        assert_eq!(summary.len(), 6);
        let surface = sweep.surface_table(10);
        assert_eq!(surface.len(), 4);
    }

    #[test]
    fn test_process_rejects_bad_configuration() {
        let mut par = ReactorParameters::default();
        par.lambda_Xe = par.lambda_I;
        assert!(matches!(
            process(&par, &short_grid()),
            Err(XenonError::DegenerateDecayConstants { .. })
        ));
        let par = ReactorParameters::default();
        let grid = TimeGrid {
            t0: 0.0,
            tf: 100.0,
            dt: -1.0,
        };
        assert!(matches!(
            process(&par, &grid),
            Err(XenonError::InvalidTimeGrid { .. })
        ));
    }

    #[test]
    fn test_json_export() {
        let mut par = ReactorParameters::default();
        par.flux_percs = vec![1.0];
        par.flux_percs_3d = vec![1.2, 1.0];
        let sweep = process(&par, &short_grid()).unwrap();
        let file = NamedTempFile::new().unwrap();
        sweep.save_to_file(file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["scenarios"].as_array().unwrap().len(), 1);
        assert_eq!(value["surface"]["rho"].as_array().unwrap().len(), 2);
        assert_eq!(value["grid"]["dt"].as_f64(), Some(3600.0));
    }

    #[test]
    fn test_json_round_trip_keeps_undefined_errors() {
        let mut par = ReactorParameters::default();
        par.flux_percs = vec![1.0];
        par.flux_percs_3d = vec![1.0];
        let mut sweep = process(&par, &short_grid()).unwrap();
        sweep.scenarios[0].error_rk4_rho[0] = f64::NAN;
        let json = sweep.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["scenarios"][0]["error_rk4_rho"][0].is_null());

        let back: SweepResults = serde_json::from_str(&json).unwrap();
        let errors = &back.scenarios[0].error_rk4_rho;
        assert_eq!(errors.len(), 21);
        assert!(errors[0].is_nan());
        assert_eq!(errors[1..], sweep.scenarios[0].error_rk4_rho[1..]);
        assert_eq!(back.scenarios[0].error_matrix_rho, sweep.scenarios[0].error_matrix_rho);
        assert_eq!(back.surface, sweep.surface);
    }

    #[test]
    fn test_nominal_error_table() {
        let par = ReactorParameters::default();
        let sweep = process(&par, &short_grid()).unwrap();
        let index = par.nominal_index().unwrap();
        // 20 samples after the initial one, every 10th printed
        let table = sweep.error_table(index, 10).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(sweep.error_table(index, 1).unwrap().len(), 21);
        assert!(sweep.error_table(par.flux_percs.len(), 1).is_none());
    }
}
