/// command-line arguments and the run driver
pub mod cli_main;
