//! Rule-entry tally for parser profiling.
//!
//! A [`RuleTally`] counts how often one named rule is entered at each cursor
//! position. It is owned by a single parser run and reported explicitly;
//! there is no process-global state.

use std::collections::HashMap;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct RuleTally {
    rule: String,
    counts: HashMap<usize, u64>,
}

impl RuleTally {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            counts: HashMap::new(),
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub(crate) fn enter(&mut self, name: &str, cursor: usize) {
        if name == self.rule {
            *self.counts.entry(cursor).or_insert(0) += 1;
        }
    }

    /// Total number of recorded entries across all positions.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// One line per position, most-entered first; ties go to the lower
    /// offset.
    pub fn report(&self) -> String {
        let mut rows: Vec<(usize, u64)> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut out = String::new();
        let _ = writeln!(out, "rule {}: {} entries", self.rule, self.total());
        for (offset, count) in rows {
            let _ = writeln!(out, "{count:>8}  at offset {offset}");
        }
        out
    }
}
