//! The grammar engine: a backtracking recursive-descent runtime.
//!
//! A [`Parser`] owns a cursor into an [`Input`] plus the deepest-failure
//! [`Frontier`]. Rules are plain functions `&mut Parser -> bool`; composite
//! rules are built from the primitives here together with the [`seq!`] and
//! [`alt!`] macros. A failing rule restores the cursor exactly; the frontier
//! only ever moves forward.
//!
//! There is no memoization. The grammar commits after unique prefixes (every
//! control-flow form starts with a reserved word), which keeps common inputs
//! linear without a packrat table.

use std::collections::BTreeSet;

use crate::input::Input;
use crate::trace::RuleTally;

/// The deepest cursor reached by any attempted rule, with the set of atomic
/// expectations recorded there and a snapshot of the named-rule stack.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    pub offset: usize,
    pub expected: BTreeSet<String>,
    pub trace: Vec<String>,
}

struct Frame {
    name: &'static str,
}

pub struct Parser<'s> {
    input: &'s Input,
    cursor: usize,
    frontier: Frontier,
    frames: Vec<Frame>,
    quiet: u32,
    tally: Option<RuleTally>,
}

impl<'s> Parser<'s> {
    pub fn new(input: &'s Input) -> Self {
        Self {
            input,
            cursor: 0,
            frontier: Frontier::default(),
            frames: Vec::new(),
            quiet: 0,
            tally: None,
        }
    }

    pub fn input(&self) -> &'s Input {
        self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Attaches a rule-entry tally; retrieve it with [`Parser::take_tally`].
    pub fn attach_tally(&mut self, tally: RuleTally) {
        self.tally = Some(tally);
    }

    pub fn take_tally(&mut self) -> Option<RuleTally> {
        self.tally.take()
    }

    pub fn mark(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self, mark: usize) {
        self.cursor = mark;
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.input.len()
    }

    pub fn peek_unit(&self) -> Option<u16> {
        self.input.unit_at(self.cursor)
    }

    fn expected_at(&mut self, at: usize, what: &str) {
        if self.quiet > 0 {
            return;
        }
        use std::cmp::Ordering;
        match at.cmp(&self.frontier.offset) {
            Ordering::Less => {}
            Ordering::Greater => {
                self.frontier.offset = at;
                self.frontier.expected.clear();
                self.frontier.expected.insert(what.to_string());
                self.frontier.trace = self.frames.iter().map(|f| f.name.to_string()).collect();
            }
            Ordering::Equal => {
                self.frontier.expected.insert(what.to_string());
                if self.frontier.trace.is_empty() {
                    self.frontier.trace =
                        self.frames.iter().map(|f| f.name.to_string()).collect();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Matches one literal character (BMP only; the grammar's literals all
    /// are).
    pub fn ch(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.lit(c.encode_utf8(&mut buf))
    }

    /// Matches a literal string. On a mismatch the frontier is updated at
    /// the first offending offset and the cursor is restored.
    pub fn lit(&mut self, s: &str) -> bool {
        let start = self.cursor;
        for unit in s.encode_utf16() {
            if self.input.unit_at(self.cursor) == Some(unit) {
                self.cursor += 1;
            } else {
                let at = self.cursor;
                self.cursor = start;
                self.expected_at(at, s);
                return false;
            }
        }
        true
    }

    /// Matches one code unit satisfying `pred`, recording `label` on failure.
    pub fn cls(&mut self, label: &str, pred: impl Fn(u16) -> bool) -> bool {
        match self.input.unit_at(self.cursor) {
            Some(u) if pred(u) => {
                self.cursor += 1;
                true
            }
            _ => {
                let at = self.cursor;
                self.expected_at(at, label);
                false
            }
        }
    }

    /// Unlabeled single-unit match. Only for use inside atomic shapes,
    /// where inner expectations are suppressed anyway.
    pub fn unit_if(&mut self, pred: impl Fn(u16) -> bool) -> bool {
        match self.input.unit_at(self.cursor) {
            Some(u) if pred(u) => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    pub fn eoi(&mut self) -> bool {
        if self.at_end() {
            true
        } else {
            let at = self.cursor;
            self.expected_at(at, "end-of-input");
            false
        }
    }

    // ------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------

    /// `a.?` — always succeeds, commits only if `a` advanced.
    pub fn opt(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let m = self.mark();
        if !f(self) {
            self.reset(m);
        }
        true
    }

    /// `a.*` — stops at the first failure or the first zero-width success.
    pub fn rep0(&mut self, mut f: impl FnMut(&mut Self) -> bool) -> bool {
        loop {
            let m = self.mark();
            if !f(self) {
                self.reset(m);
                return true;
            }
            if self.cursor == m {
                return true;
            }
        }
    }

    /// `a.+`
    pub fn rep1(&mut self, mut f: impl FnMut(&mut Self) -> bool) -> bool {
        if !f(self) {
            return false;
        }
        self.rep0(f)
    }

    /// `a (s a)*`
    pub fn rep_sep(
        &mut self,
        mut f: impl FnMut(&mut Self) -> bool,
        mut sep: impl FnMut(&mut Self) -> bool,
    ) -> bool {
        if !f(self) {
            return false;
        }
        loop {
            let m = self.mark();
            if !sep(self) || !f(self) {
                self.reset(m);
                return true;
            }
            if self.cursor == m {
                return true;
            }
        }
    }

    /// `&a` — positive lookahead; never advances, frontier recordings stand.
    pub fn peek(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let m = self.mark();
        let ok = f(self);
        self.reset(m);
        ok
    }

    /// `!a` — negative lookahead; `a`'s own expectations are suppressed.
    pub fn not(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let m = self.mark();
        self.quiet += 1;
        let ok = f(self);
        self.quiet -= 1;
        self.reset(m);
        if ok {
            self.expected_at(m, "unexpected input");
            false
        } else {
            true
        }
    }

    /// Runs `f` as a single token: inner expectations are suppressed, and a
    /// failure reports `name` at the rule's entry cursor.
    pub fn atomic(&mut self, name: &'static str, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let start = self.mark();
        self.quiet += 1;
        let ok = f(self);
        self.quiet -= 1;
        if !ok {
            self.reset(start);
            self.expected_at(start, name);
        }
        ok
    }

    /// Runs `f` and, on success, returns the matched slice.
    pub fn capture(&mut self, f: impl FnOnce(&mut Self) -> bool) -> Option<String> {
        let start = self.mark();
        if f(self) {
            Some(self.input.slice(start, self.cursor))
        } else {
            self.reset(start);
            None
        }
    }

    /// Always succeeds after running `effect`. Used by instrumentation.
    pub fn run(&mut self, effect: impl FnOnce(&mut Self)) -> bool {
        effect(self);
        true
    }

    /// Runs `f` with frontier recording off. For low-level matches
    /// (newlines, skipped characters) whose failure is routine.
    pub fn quiet(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.quiet += 1;
        let ok = f(self);
        self.quiet -= 1;
        ok
    }

    /// Enters a named rule: pushes a trace frame and feeds the tally.
    pub fn named(&mut self, name: &'static str, f: impl FnOnce(&mut Self) -> bool) -> bool {
        if let Some(tally) = self.tally.as_mut() {
            tally.enter(name, self.cursor);
        }
        self.frames.push(Frame { name });
        let ok = f(self);
        self.frames.pop();
        ok
    }
}

/// Sequencing: every step must succeed in order; on any failure the cursor
/// is restored to the position before the first step.
#[macro_export]
macro_rules! seq {
    ($p:expr, $($step:expr),+ $(,)?) => {{
        let __start = $p.mark();
        if $( $step )&&+ {
            true
        } else {
            $p.reset(__start);
            false
        }
    }};
}

/// Ordered choice: the first branch that matches wins; the cursor is
/// restored between branches.
#[macro_export]
macro_rules! alt {
    ($p:expr, $($branch:expr),+ $(,)?) => {{
        let __start = $p.mark();
        loop {
            $(
                if $branch {
                    break true;
                }
                $p.reset(__start);
            )+
            break false;
        }
    }};
}
