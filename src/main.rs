use clap::Parser;
use log::error;
use molmass_calc::Utils::logger::init_logging;
use molmass_calc::cli::cli_main::{CliArgs, run};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(e) = init_logging(args.verbosity, args.quiet, args.log_file.as_deref()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    match run(&args, &mut input, &mut out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("console error: {}", e);
            ExitCode::FAILURE
        }
    }
}
