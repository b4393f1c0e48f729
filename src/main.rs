//! Binary entrypoint for the `scribe` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match scribe::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
