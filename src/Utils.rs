/// wall-clock timing of the integrators
pub mod performance;
