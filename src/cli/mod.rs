//! The skald command-line interface: argument dispatch and exit codes.

use std::path::Path;
use std::process;

use clap::Parser;
use termcolor::StandardStream;

use crate::cli::args::{Command, SkaldArgs};
use crate::corpus::Runner;
use crate::grammar;

pub mod args;
pub mod output;

/// The main entry point for the CLI. Exits with a nonzero code when a check
/// run had failures or a single parse did not succeed.
pub fn run() -> ! {
    let args = SkaldArgs::parse();
    let code = match args.command {
        Command::Check { roots, json } => handle_check(&roots, json),
        Command::Parse { file } => handle_parse(&file),
        Command::Trace { file, rule } => handle_trace(&file, &rule),
    };
    process::exit(code);
}

fn handle_check(roots: &[std::path::PathBuf], json: bool) -> i32 {
    let runner = Runner::new();
    let (reports, summary) = runner.run(roots);
    let mut stdout = StandardStream::stdout(output::color_choice());
    if json {
        output::print_json(&mut stdout, &reports, &summary);
    } else {
        for report in &reports {
            output::print_report(&mut stdout, report);
        }
        output::print_summary(&mut stdout, &summary);
    }
    if summary.all_passed() {
        0
    } else {
        1
    }
}

fn handle_parse(file: &Path) -> i32 {
    let source = match std::fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("cannot read {}: {e}", file.display());
            return 1;
        }
    };
    match grammar::parse_named(&file.display().to_string(), &source) {
        Ok(()) => {
            println!("ok");
            0
        }
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            1
        }
    }
}

fn handle_trace(file: &Path, rule: &str) -> i32 {
    let source = match std::fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("cannot read {}: {e}", file.display());
            return 1;
        }
    };
    let (outcome, tally) = grammar::parse_traced(&file.display().to_string(), &source, rule);
    print!("{}", tally.report());
    match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            1
        }
    }
}
