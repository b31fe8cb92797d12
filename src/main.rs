use clap::Parser;
use std::process;
use trips_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("{}", error_report(&error));
            process::exit(1);
        }
    }
}

/// Render an error and its full cause chain for stderr
fn error_report(error: &trips_processor::Error) -> String {
    let mut report = format!("Error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        report.push_str(&format!("\n  Caused by: {cause}"));
        source = cause.source();
    }
    report
}
