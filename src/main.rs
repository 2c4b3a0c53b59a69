use XeTransient::cli::cli_main::{Args, run};
use clap::Parser;
use log::error;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

pub fn main() {
    let args = Args::parse();
    if let Err(e) = TermLogger::init(
        args.log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not initialized: {}", e);
    }
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
