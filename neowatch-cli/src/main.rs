//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use neowatch_cli::CliError;

fn main() {
    let _logger = match neowatch_cli::init_logging() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("neowatch: {err}");
            None
        }
    };
    match neowatch_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("neowatch: {err}");
            std::process::exit(1);
        }
    }
}
