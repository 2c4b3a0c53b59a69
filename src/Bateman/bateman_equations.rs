use crate::Parameters::ReactorParameters;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::{DVector, Matrix2};

/// Time derivative of the state `y = [I, Xe]`.
///
/// `a` - external iodine production rate, `b` - net external xenon production/loss rate; both
/// default to zero (unforced system used after the flux change).
///
/// # Panics
/// if `y` has fewer than two components
pub fn bateman_equations(
    par: &ReactorParameters,
    y: &DVector<f64>,
    a: Option<f64>,
    b: Option<f64>,
) -> DVector<f64> {
    let a = a.unwrap_or(0.0);
    let b = b.unwrap_or(0.0);
    let (I, Xe) = (y[0], y[1]);
    let dI_dt = a - par.lambda_I * I;
    let dXe_dt = par.lambda_I * I - par.lambda_Xe * Xe + b;
    DVector::from_vec(vec![dI_dt, dXe_dt])
}

/// Same equations in symbolic form, for symbolic differentiation.
pub fn bateman_equations_sym(
    par: &ReactorParameters,
    I: Expr,
    Xe: Expr,
    a: Expr,
    b: Expr,
) -> Vec<Expr> {
    let lambda_I = Expr::Const(par.lambda_I);
    let lambda_Xe = Expr::Const(par.lambda_Xe);
    let dI_dt = a - lambda_I.clone() * I.clone();
    let dXe_dt = lambda_I * I - lambda_Xe * Xe + b;
    vec![dI_dt, dXe_dt]
}

/// Source terms `(a, b)` that keep the reactor at flux fraction `flux_per` with xenon `Xe0`.
pub fn source_terms(par: &ReactorParameters, flux_per: f64, Xe0: f64) -> (f64, f64) {
    let fission_rate = par.fission_rate(flux_per);
    let a = par.gamma_I * fission_rate;
    let b = par.gamma_Xe * fission_rate - par.sigma_Xe * Xe0 * flux_per * par.Phi;
    (a, b)
}

/// Matrix `A` of the unforced system `dy/dt = A*y`.
///
/// Built column by column from the unforced right-hand side evaluated on the unit vectors, so it
/// always matches [`bateman_equations`].
pub fn system_matrix(par: &ReactorParameters) -> Matrix2<f64> {
    let col0 = bateman_equations(par, &DVector::from_vec(vec![1.0, 0.0]), None, None);
    let col1 = bateman_equations(par, &DVector::from_vec(vec![0.0, 1.0]), None, None);
    Matrix2::new(col0[0], col1[0], col0[1], col1[1])
}
