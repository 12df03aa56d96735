//! Failure reporting for parse runs.
//!
//! Rule failures inside the engine are values, not errors; only the
//! top-level entry point turns the final [`Frontier`] into a [`ParseError`].
//! The structured fields stay plain and inspectable; miette is layered on
//! top for terminal rendering.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::engine::Frontier;
use crate::input::Input;

/// Where a parse failed and what was expected there.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Offset in UTF-16 code units.
    pub offset: usize,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
    /// Alphabetically sorted atomic expectations.
    pub expected: Vec<String>,
    /// Named rules live at the deepest failure, outermost first.
    pub trace: Vec<String>,
    line_text: String,
    source: Arc<NamedSource<String>>,
    span: SourceSpan,
}

impl ParseError {
    pub(crate) fn from_frontier(input: &Input, frontier: &Frontier) -> Self {
        let offset = frontier.offset;
        let info = input.line_of(offset);
        let byte_start = input.byte_offset(offset);
        let byte_len = input.byte_offset(offset + 1).saturating_sub(byte_start);
        Self {
            offset,
            line: info.line,
            column: info.column,
            expected: frontier.expected.iter().cloned().collect(),
            trace: frontier.trace.clone(),
            line_text: info.text,
            source: Arc::new(input.to_named_source()),
            span: SourceSpan::new(byte_start.into(), byte_len),
        }
    }

    /// The expected set as prose: `"a, b or c"`.
    pub fn formatted_expected(&self) -> String {
        match self.expected.as_slice() {
            [] => "nothing".to_string(),
            [only] => only.clone(),
            [head @ .., last] => format!("{} or {}", head.join(", "), last),
        }
    }

    /// The failing source line with a caret under the failure column.
    pub fn formatted_line(&self) -> String {
        let caret_pad = " ".repeat(self.column.saturating_sub(1));
        format!("{}\n{}^", self.line_text, caret_pad)
    }

    /// The named-rule stack at the failure, innermost last.
    pub fn formatted_trace(&self) -> String {
        let mut out = String::new();
        for (depth, name) in self.trace.iter().enumerate() {
            out.push_str(&"  ".repeat(depth));
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at {}:{}:{}: expected {}",
            self.source.name(),
            self.line,
            self.column,
            self.formatted_expected()
        )
    }
}

/// The one error kind the recognizer produces. `Incomplete` means the top
/// rule returned success without reaching end of input, which indicates a
/// grammar bug rather than bad user input.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("{0}")]
    Parse(ParseError),
    #[error("parse stopped at offset {offset} with {remaining} code units left")]
    Incomplete { offset: usize, remaining: usize },
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            SyntaxError::Parse(_) => Some(Box::new("skald::parse")),
            SyntaxError::Incomplete { .. } => Some(Box::new("skald::incomplete")),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            SyntaxError::Parse(e) => Some(Box::new(format!(
                "expected {}",
                e.formatted_expected()
            ))),
            SyntaxError::Incomplete { .. } => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            SyntaxError::Parse(e) => {
                let label = LabeledSpan::new_with_span(
                    Some(format!("expected {}", e.formatted_expected())),
                    e.span,
                );
                Some(Box::new(std::iter::once(label)))
            }
            SyntaxError::Incomplete { .. } => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            SyntaxError::Parse(e) => Some(&*e.source),
            SyntaxError::Incomplete { .. } => None,
        }
    }
}
