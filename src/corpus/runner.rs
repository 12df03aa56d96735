//! Classifies corpus files as Pass, Fail or Skip.
//!
//! Skip rules mirror the corpus conventions: shebang scripts, lines that
//! spell a bare `\uXXXX` escape (the recognizer works on code units, such
//! files are preprocessed elsewhere), anything under a `failing` directory,
//! and files that cannot be read. A `neg` path segment inverts the expected
//! outcome: there, failing to parse is the passing result.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use crate::corpus::discovery::discover_sources;
use crate::diagnostics::SyntaxError;
use crate::grammar;

#[derive(Debug)]
pub enum FileStatus {
    Ok,
    /// The error is absent when a `neg` file parsed even though it must not.
    Failed(Option<SyntaxError>),
    Skip(String),
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Ok => "ok",
            FileStatus::Failed(_) => "failed",
            FileStatus::Skip(_) => "skip",
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Source length in UTF-16 code units, the parser's own addressing.
    pub len: usize,
    pub status: FileStatus,
}

#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Serialize)]
pub struct JsonFile {
    pub path: String,
    pub len: usize,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub files: Vec<JsonFile>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

pub struct Runner {
    escape_line: Regex,
}

impl Runner {
    pub fn new() -> Self {
        Self {
            escape_line: Regex::new(r#"^[^"']*\\u[0-9]{4}[^"']*$"#).unwrap(),
        }
    }

    /// Walks `roots`, classifies every discovered file and tallies.
    pub fn run(&self, roots: &[PathBuf]) -> (Vec<FileReport>, RunSummary) {
        let mut reports = Vec::new();
        let mut summary = RunSummary::default();
        for root in roots {
            for path in discover_sources(root) {
                let report = self.classify(&path);
                match report.status {
                    FileStatus::Ok => summary.passed += 1,
                    FileStatus::Failed(_) => summary.failed += 1,
                    FileStatus::Skip(_) => summary.skipped += 1,
                }
                reports.push(report);
            }
        }
        (reports, summary)
    }

    pub fn classify(&self, path: &Path) -> FileReport {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return FileReport {
                    path: path.to_path_buf(),
                    len: 0,
                    status: FileStatus::Skip(format!("unreadable: {e}")),
                }
            }
        };
        let len = content.encode_utf16().count();
        let status = self.status_of(path, &content);
        FileReport {
            path: path.to_path_buf(),
            len,
            status,
        }
    }

    fn status_of(&self, path: &Path, content: &str) -> FileStatus {
        if content.starts_with("#!") {
            return FileStatus::Skip("script shebang".into());
        }
        if content.lines().any(|line| self.escape_line.is_match(line)) {
            return FileStatus::Skip("bare unicode escape line".into());
        }
        if has_segment(path, "failing") {
            return FileStatus::Skip("failing corpus".into());
        }

        let outcome = grammar::parse_named(&path.display().to_string(), content);
        if has_segment(path, "neg") {
            match outcome {
                Ok(()) => FileStatus::Failed(None),
                Err(_) => FileStatus::Ok,
            }
        } else {
            match outcome {
                Ok(()) => FileStatus::Ok,
                Err(e) => FileStatus::Failed(Some(e)),
            }
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

pub fn json_summary(reports: &[FileReport], summary: &RunSummary) -> JsonSummary {
    JsonSummary {
        files: reports
            .iter()
            .map(|r| JsonFile {
                path: r.path.display().to_string(),
                len: r.len,
                status: r.status.label(),
            })
            .collect(),
        passed: summary.passed,
        failed: summary.failed,
        skipped: summary.skipped,
    }
}

fn has_segment(path: &Path, name: &str) -> bool {
    path.components().any(|c| c.as_os_str() == name)
}
