use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Time-ordered samples `(t_i, y_i)` produced by a fixed-step integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub y: Vec<DVector<f64>>,
}

impl Trajectory {
    /// trajectory holding only the initial sample, with room for `n_steps` more
    pub fn new(t0: f64, y0: DVector<f64>, n_steps: usize) -> Self {
        let mut t = Vec::with_capacity(n_steps + 1);
        let mut y = Vec::with_capacity(n_steps + 1);
        t.push(t0);
        y.push(y0);
        Self { t, y }
    }

    pub fn push(&mut self, t: f64, y: DVector<f64>) {
        self.t.push(t);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn last(&self) -> Option<(f64, &DVector<f64>)> {
        self.t.last().copied().zip(self.y.last())
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, &DVector<f64>)> {
        self.t.iter().copied().zip(self.y.iter())
    }

    /// time series of the `k`-th state component
    pub fn component(&self, k: usize) -> Vec<f64> {
        self.y.iter().map(|y| y[k]).collect()
    }

    /// `(t, g(y_k))` for every sample, e.g. poisoning from xenon
    pub fn map_component<G: Fn(f64) -> f64>(&self, k: usize, g: G) -> Vec<(f64, f64)> {
        self.samples().map(|(t, y)| (t, g(y[k]))).collect()
    }

    /// `(t, I, Xe)` rows for a two-species trajectory
    pub fn populations(&self) -> Vec<(f64, f64, f64)> {
        self.samples().map(|(t, y)| (t, y[0], y[1])).collect()
    }
}
