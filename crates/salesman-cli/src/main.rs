#![deny(clippy::all)]

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod generate;
mod logging;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logger(cli.log_level) {
        eprintln!("{err}");
    }

    match commands::run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
