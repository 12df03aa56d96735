//! The grammar, layered over the engine: character classes and skipping,
//! tokens, then types, patterns, expressions and definitions. The only
//! entry points are here; everything else is rule plumbing.

pub(crate) mod basics;
pub(crate) mod defs;
pub(crate) mod exprs;
pub(crate) mod patterns;
pub(crate) mod tokens;
pub(crate) mod types;

use crate::diagnostics::{ParseError, SyntaxError};
use crate::engine::Parser;
use crate::input::Input;
use crate::trace::RuleTally;

/// Recognizes `source` as a full compilation unit.
pub fn parse(source: &str) -> Result<(), SyntaxError> {
    parse_named("<input>", source)
}

/// As [`parse`], with a display name for diagnostics.
pub fn parse_named(name: &str, source: &str) -> Result<(), SyntaxError> {
    let input = Input::new(name, source);
    let mut parser = Parser::new(&input);
    finish(&mut parser, &input)
}

/// As [`parse_named`], while counting entries to the named rule at each
/// cursor position.
pub fn parse_traced(
    name: &str,
    source: &str,
    rule: &str,
) -> (Result<(), SyntaxError>, RuleTally) {
    let input = Input::new(name, source);
    let mut parser = Parser::new(&input);
    parser.attach_tally(RuleTally::new(rule));
    let outcome = finish(&mut parser, &input);
    let tally = parser
        .take_tally()
        .unwrap_or_else(|| RuleTally::new(rule));
    (outcome, tally)
}

fn finish(parser: &mut Parser, input: &Input) -> Result<(), SyntaxError> {
    if parser.compilation_unit() {
        if parser.at_end() {
            Ok(())
        } else {
            Err(SyntaxError::Incomplete {
                offset: parser.cursor(),
                remaining: input.len() - parser.cursor(),
            })
        }
    } else {
        Err(SyntaxError::Parse(ParseError::from_frontier(
            input,
            parser.frontier(),
        )))
    }
}
