#[allow(non_snake_case)]
pub mod Bateman;
#[allow(non_snake_case)]
pub mod Integrators;
#[allow(non_snake_case)]
pub mod Parameters;
#[allow(non_snake_case)]
pub mod Scenarios;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod errors;
