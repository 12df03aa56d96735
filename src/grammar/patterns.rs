//! The pattern grammar.
//!
//! `VarId @ Pat` is tried before bare `VarId`, so a binder with a sub-pattern
//! wins over a plain binder on the same prefix.

use crate::engine::Parser;
use crate::{alt, seq};

impl Parser<'_> {
    pub(crate) fn pattern(&mut self) -> bool {
        self.named("Pattern", |p| p.rep_sep(Self::pattern1, |p| p.op("|")))
    }

    pub(crate) fn pattern1(&mut self) -> bool {
        alt!(
            self,
            seq!(self, self.underscore(), self.op(":"), self.type_pat()),
            seq!(self, self.var_id(), self.op(":"), self.type_pat()),
            self.pattern2()
        )
    }

    pub(crate) fn pattern2(&mut self) -> bool {
        alt!(
            self,
            seq!(self, self.var_id(), self.op("@"), self.pattern3()),
            self.pattern3(),
            self.var_id()
        )
    }

    fn pattern3(&mut self) -> bool {
        alt!(
            self,
            seq!(self, self.underscore(), self.op("*")),
            seq!(
                self,
                self.simple_pattern(),
                self.rep0(|p| seq!(p, p.id(), p.simple_pattern()))
            )
        )
    }

    fn simple_pattern(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.underscore(),
                self.opt(|p| seq!(p, p.op(":"), p.type_pat())),
                self.not(|p| p.op("*"))
            ),
            self.literal(),
            seq!(
                self,
                self.tok("("),
                self.opt(Self::extractor_args),
                self.tok(")")
            ),
            seq!(
                self,
                self.stable_id(),
                self.opt(|p| {
                    seq!(p, p.tok("("), p.opt(Self::extractor_args), p.tok(")"))
                })
            ),
            self.var_id()
        )
    }

    fn extractor_args(&mut self) -> bool {
        self.rep_sep(Self::pattern, |p| p.tok(","))
    }

    fn type_pat(&mut self) -> bool {
        self.compound_type()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Parser;
    use crate::input::Input;

    fn accepts_pattern(text: &str) -> bool {
        let input = Input::new("t", text);
        let mut p = Parser::new(&input);
        p.pattern() && p.at_end()
    }

    #[test]
    fn binders_wildcards_and_literals() {
        assert!(accepts_pattern("x"));
        assert!(accepts_pattern("_"));
        assert!(accepts_pattern("42"));
        assert!(accepts_pattern("\"s\""));
        assert!(accepts_pattern("Nil"));
    }

    #[test]
    fn typed_patterns() {
        assert!(accepts_pattern("x: Int"));
        assert!(accepts_pattern("_: List[Int]"));
    }

    #[test]
    fn extractor_and_tuple_patterns() {
        assert!(accepts_pattern("Some(x)"));
        assert!(accepts_pattern("A(B(c), _)"));
        assert!(accepts_pattern("(a, b)"));
        assert!(accepts_pattern("scala.Some(x)"));
        assert!(accepts_pattern("Nil()"));
    }

    #[test]
    fn bound_infix_and_alternative_patterns() {
        assert!(accepts_pattern("all @ Some(x)"));
        assert!(accepts_pattern("x :: rest"));
        assert!(accepts_pattern("a | b"));
        assert!(accepts_pattern("xs @ _*"));
    }

    #[test]
    fn wildcard_sequence_needs_the_star_shape() {
        assert!(!accepts_pattern("@"));
        assert!(!accepts_pattern("x @"));
    }
}
