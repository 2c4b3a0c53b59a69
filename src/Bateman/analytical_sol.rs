//! Closed-form xenon concentration, poisoning and relative errors.
//!
//! The analytical solution describes xenon after the flux is removed from a reactor that sat at
//! equilibrium under nominal flux:
//! ```text
//! Xe(t) = Sigma_f*Phi*[ (gamma_I+gamma_Xe)/(lambda_Xe+sigma_Xe*Phi)*exp(-lambda_Xe*t)
//!                       + gamma_I/(lambda_I-lambda_Xe)*(exp(-lambda_Xe*t) - exp(-lambda_I*t)) ]
//! ```
//! Poisoning: `rho = sigma_Xe*Xe/(nu*Sigma_f)`.
//!
//! Relative error: `(rho_analytic - rho_numerical)/rho_analytic`, positive when the numerical
//! value underestimates. Where `rho_analytic` is exactly zero the error is undefined and the
//! element is `NaN`; sequences always keep the index alignment of their inputs.
use crate::Parameters::ReactorParameters;

/// analytical xenon concentration at time `t` [s]; requires `lambda_I != lambda_Xe`, which
/// [`ReactorParameters::validate`] guarantees
pub fn Xe_analytical(par: &ReactorParameters, t: f64) -> f64 {
    let term1 = par.Sigma_f * par.Phi;
    let term2 = ((par.gamma_I + par.gamma_Xe) / (par.lambda_Xe + par.sigma_Xe * par.Phi))
        * (-par.lambda_Xe * t).exp();
    let term3 = par.gamma_I / (par.lambda_I - par.lambda_Xe)
        * ((-par.lambda_Xe * t).exp() - (-par.lambda_I * t).exp());
    term1 * (term2 + term3)
}

/// poisoning from a xenon concentration
pub fn calculate_rho(par: &ReactorParameters, Xe: f64) -> f64 {
    par.sigma_Xe * Xe / (par.nu * par.Sigma_f)
}

/// analytical poisoning at each time of `times`
pub fn rho_analytical(par: &ReactorParameters, times: &[f64]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| calculate_rho(par, Xe_analytical(par, t)))
        .collect()
}

/// Relative errors of `rho_numerical` against `rho_analytic`, paired by position.
///
/// The output length is the shorter of the two inputs. A zero analytical value gives `NaN`.
pub fn calculate_errors(rho_numerical: &[f64], rho_analytic: &[f64]) -> Vec<f64> {
    rho_numerical
        .iter()
        .zip(rho_analytic.iter())
        .map(|(&rho_num, &rho_ana)| {
            if rho_ana == 0.0 {
                f64::NAN
            } else {
                (rho_ana - rho_num) / rho_ana
            }
        })
        .collect()
}

/// (index, error) pairs with the non-finite entries left out
pub fn finite_errors(errors: &[f64]) -> Vec<(usize, f64)> {
    errors
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_finite())
        .map(|(i, &e)| (i, e))
        .collect()
}

/// largest |error| over the finite entries, `None` when there are none
pub fn max_abs_error(errors: &[f64]) -> Option<f64> {
    errors
        .iter()
        .filter(|e| e.is_finite())
        .map(|e| e.abs())
        .fold(None, |acc: Option<f64>, e| Some(acc.map_or(e, |m| m.max(e))))
}
