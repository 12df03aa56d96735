//! Handles all user-facing output for the CLI: per-file status lines, the
//! run summary and diagnostic blocks for failures.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::corpus::runner::{json_summary, FileReport, FileStatus, RunSummary};
use crate::diagnostics::SyntaxError;

pub fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn status_color(status: &FileStatus) -> Option<Color> {
    match status {
        FileStatus::Ok => Some(Color::Green),
        FileStatus::Failed(_) => Some(Color::Red),
        FileStatus::Skip(_) => Some(Color::Yellow),
    }
}

/// One line per file: `[<len>] <path>  <ok|failed|skip>`, with a diagnostic
/// block underneath when the parse failed.
pub fn print_report(stdout: &mut StandardStream, report: &FileReport) {
    let _ = write!(stdout, "[{}] {}  ", report.len, report.path.display());
    let _ = stdout.set_color(ColorSpec::new().set_fg(status_color(&report.status)));
    let _ = writeln!(stdout, "{}", report.status.label());
    let _ = stdout.reset();

    if let FileStatus::Failed(Some(error)) = &report.status {
        print_diagnostic_block(stdout, error);
    }
}

fn print_diagnostic_block(stdout: &mut StandardStream, error: &SyntaxError) {
    match error {
        SyntaxError::Parse(e) => {
            let _ = writeln!(
                stdout,
                "    at line {}, column {}: expected {}",
                e.line,
                e.column,
                e.formatted_expected()
            );
            for line in e.formatted_line().lines() {
                let _ = writeln!(stdout, "    {line}");
            }
            for line in e.formatted_trace().lines() {
                let _ = writeln!(stdout, "    {line}");
            }
        }
        SyntaxError::Incomplete { offset, remaining } => {
            let _ = writeln!(
                stdout,
                "    incomplete parse: stopped at offset {offset} with {remaining} units left"
            );
        }
    }
}

pub fn print_summary(stdout: &mut StandardStream, summary: &RunSummary) {
    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    let _ = writeln!(
        stdout,
        "{} passed, {} failed, {} skipped",
        summary.passed, summary.failed, summary.skipped
    );
    let _ = stdout.reset();
}

pub fn print_json(stdout: &mut StandardStream, reports: &[FileReport], summary: &RunSummary) {
    let payload = json_summary(reports, summary);
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => {
            let _ = writeln!(stdout, "{text}");
        }
        Err(e) => {
            eprintln!("failed to render JSON summary: {e}");
        }
    }
}
