use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use env_logger::init;
use fontname_cli::cli::Cli;

fn main() -> ExitCode {
    init();
    match Cli::try_parse() {
        Ok(cli) => cli.run(),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // exit 1, not clap's 2
            let _ = e.print();
            ExitCode::FAILURE
        }
    }
}
