use std::process::ExitCode;

use clap::Parser;

use shiftinvert::cli::{self, CliArgs};
use shiftinvert::settings::InvertSettings;
use shiftinvert::logger;

fn main() -> ExitCode {
    // Parse first so --help / --version never truncate the previous log.
    let args = CliArgs::parse();

    logger::init();
    let settings = InvertSettings::load();

    cli::run(args, &settings)
}
