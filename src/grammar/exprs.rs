//! The expression grammar and its two semicolon-inference modes.
//!
//! Brace-delimited contexts are newline-sensitive: a newline there can end a
//! statement, so the infix layer guards against crossing one. Paren contexts
//! treat newlines as plain whitespace. The mode is lexically scoped by the
//! construct that introduced it and is threaded as a parameter, never stored
//! in mutable state, so backtracking cannot leave it stale.

use crate::engine::Parser;
use crate::{alt, seq};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Sensitive,
    Insensitive,
}

impl Parser<'_> {
    fn maybe_no_newline(&mut self, mode: Mode) -> bool {
        match mode {
            Mode::Sensitive => self.no_newline(),
            Mode::Insensitive => true,
        }
    }

    fn maybe_one_newline(&mut self, mode: Mode) -> bool {
        match mode {
            Mode::Sensitive => self.one_newline_max(),
            Mode::Insensitive => true,
        }
    }

    pub(crate) fn expr(&mut self, mode: Mode) -> bool {
        self.named("Expr", |p| {
            seq!(
                p,
                p.rep0(|p| p.lambda_head(mode)),
                alt!(
                    p,
                    p.if_expr(mode),
                    p.while_expr(mode),
                    p.try_expr(mode),
                    p.do_expr(mode),
                    p.for_expr(mode),
                    p.throw_expr(mode),
                    p.return_expr(mode),
                    p.assign_expr(mode),
                    seq!(
                        p,
                        p.postfix_expr(mode),
                        p.opt(|p| p.expr_trailer(mode))
                    )
                )
            )
        })
    }

    fn lambda_head(&mut self, _mode: Mode) -> bool {
        seq!(
            self,
            alt!(
                self,
                self.lambda_bindings(),
                seq!(
                    self,
                    self.opt(|p| p.kw("implicit")),
                    self.id(),
                    self.opt(|p| seq!(p, p.op(":"), p.infix_type()))
                ),
                seq!(
                    self,
                    self.underscore(),
                    self.opt(|p| seq!(p, p.op(":"), p.typ()))
                )
            ),
            self.right_arrow()
        )
    }

    fn lambda_bindings(&mut self) -> bool {
        seq!(
            self,
            self.tok("("),
            self.opt(|p| p.rep_sep(Self::lambda_binding, |p| p.tok(","))),
            self.tok(")")
        )
    }

    fn lambda_binding(&mut self) -> bool {
        seq!(
            self,
            alt!(self, self.id(), self.underscore()),
            self.opt(|p| seq!(p, p.op(":"), p.typ()))
        )
    }

    // ------------------------------------------------------------------
    // Control flow
    // ------------------------------------------------------------------

    fn if_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.kw("if"),
            self.tok("("),
            self.expr(Mode::Insensitive),
            self.tok(")"),
            self.expr(mode),
            self.opt(|p| {
                seq!(p, p.opt(Self::semi), p.kw("else"), p.expr(mode))
            })
        )
    }

    fn while_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.kw("while"),
            self.tok("("),
            self.expr(Mode::Insensitive),
            self.tok(")"),
            self.expr(mode)
        )
    }

    fn try_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.kw("try"),
            self.expr(mode),
            self.opt(|p| seq!(p, p.kw("catch"), p.expr(mode))),
            self.opt(|p| seq!(p, p.kw("finally"), p.expr(mode)))
        )
    }

    fn do_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.kw("do"),
            self.expr(mode),
            self.opt(Self::semi),
            self.kw("while"),
            self.tok("("),
            self.expr(Mode::Insensitive),
            self.tok(")")
        )
    }

    /// `for` with paren enumerators is newline-insensitive, with brace
    /// enumerators sensitive; the body follows the surrounding mode.
    fn for_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.kw("for"),
            alt!(
                self,
                seq!(
                    self,
                    self.tok("("),
                    self.enumerators(Mode::Insensitive),
                    self.tok(")")
                ),
                seq!(
                    self,
                    self.tok("{"),
                    self.enumerators(Mode::Sensitive),
                    self.tok("}")
                )
            ),
            self.opt(|p| p.kw("yield")),
            self.expr(mode)
        )
    }

    fn throw_expr(&mut self, mode: Mode) -> bool {
        seq!(self, self.kw("throw"), self.expr(mode))
    }

    fn return_expr(&mut self, mode: Mode) -> bool {
        seq!(self, self.kw("return"), self.opt(|p| p.expr(mode)))
    }

    fn enumerators(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.generator(mode),
            self.rep0(|p| seq!(p, p.semis(), p.enumerator(mode)))
        )
    }

    fn generator(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.pattern1(),
            self.left_arrow(),
            self.expr(mode),
            self.opt(|p| p.guard(mode))
        )
    }

    fn enumerator(&mut self, mode: Mode) -> bool {
        alt!(
            self,
            self.generator(mode),
            self.guard(mode),
            seq!(self, self.pattern1(), self.op("="), self.expr(mode))
        )
    }

    fn guard(&mut self, mode: Mode) -> bool {
        seq!(self, self.kw("if"), self.postfix_expr(mode))
    }

    fn assign_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.simple_expr(mode),
            self.op("="),
            self.expr(mode)
        )
    }

    fn expr_trailer(&mut self, mode: Mode) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.kw("match"),
                self.tok("{"),
                self.case_clauses(),
                self.tok("}")
            ),
            self.ascription(mode)
        )
    }

    /// `: T`, `: _*` or `: @annot ...` after an expression.
    fn ascription(&mut self, _mode: Mode) -> bool {
        seq!(
            self,
            self.op(":"),
            alt!(
                self,
                seq!(self, self.underscore(), self.op("*")),
                self.rep1(Self::annotation),
                self.typ()
            )
        )
    }

    // ------------------------------------------------------------------
    // Operator layering
    // ------------------------------------------------------------------

    pub(crate) fn postfix_expr(&mut self, mode: Mode) -> bool {
        self.named("PostfixExpr", |p| {
            seq!(
                p,
                p.prefix_expr(mode),
                p.rep0(|p| p.infix_part(mode)),
                p.opt(Self::postfix_part)
            )
        })
    }

    fn infix_part(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.maybe_no_newline(mode),
            self.id(),
            self.opt(Self::type_args),
            self.maybe_one_newline(mode),
            self.prefix_expr(mode)
        )
    }

    fn postfix_part(&mut self) -> bool {
        seq!(
            self,
            self.no_newline(),
            self.id(),
            self.opt(Self::newline)
        )
    }

    fn prefix_expr(&mut self, mode: Mode) -> bool {
        seq!(
            self,
            self.opt(|p| {
                alt!(p, p.op("-"), p.op("+"), p.op("~"), p.op("!"))
            }),
            self.simple_expr(mode)
        )
    }

    pub(crate) fn simple_expr(&mut self, mode: Mode) -> bool {
        self.named("SimpleExpr", |p| {
            seq!(
                p,
                p.simple_expr_start(),
                p.rep0(|p| p.simple_expr_part(mode)),
                p.opt(|p| seq!(p, p.maybe_no_newline(mode), p.underscore()))
            )
        })
    }

    fn simple_expr_start(&mut self) -> bool {
        alt!(
            self,
            self.new_expr(),
            self.block_expr(),
            self.literal(),
            self.stable_id(),
            self.underscore(),
            self.paren_exprs()
        )
    }

    fn paren_exprs(&mut self) -> bool {
        seq!(
            self,
            self.tok("("),
            self.opt(|p| {
                p.rep_sep(|p| p.expr(Mode::Insensitive), |p| p.tok(","))
            }),
            self.tok(")")
        )
    }

    fn new_expr(&mut self) -> bool {
        seq!(self, self.kw("new"), self.class_template())
    }

    fn simple_expr_part(&mut self, mode: Mode) -> bool {
        alt!(
            self,
            seq!(self, self.tok("."), self.id()),
            self.type_args(),
            seq!(self, self.maybe_no_newline(mode), self.arg_list())
        )
    }

    fn arg_list(&mut self) -> bool {
        alt!(
            self,
            self.paren_exprs(),
            seq!(self, self.one_newline_max(), self.block_expr())
        )
    }

    // ------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------

    pub(crate) fn block_expr(&mut self) -> bool {
        seq!(
            self,
            self.tok("{"),
            alt!(self, self.case_clauses(), self.block_body()),
            self.tok("}")
        )
    }

    pub(crate) fn case_clauses(&mut self) -> bool {
        self.rep1(Self::case_clause)
    }

    fn case_clause(&mut self) -> bool {
        seq!(
            self,
            self.kw("case"),
            self.pattern(),
            self.opt(|p| p.guard(Mode::Sensitive)),
            self.right_arrow(),
            self.block_body()
        )
    }

    /// Block contents: statements, a result expression, or nothing, always
    /// closed by `BlockEnd` (optional separators plus a `}`/`case`
    /// lookahead).
    pub(crate) fn block_body(&mut self) -> bool {
        self.named("Block", |p| {
            seq!(
                p,
                p.opt(Self::semis),
                alt!(
                    p,
                    seq!(
                        p,
                        p.block_stats(),
                        p.opt(|p| seq!(p, p.semis(), p.result_expr())),
                        p.block_end()
                    ),
                    seq!(p, p.result_expr(), p.block_end()),
                    p.block_end()
                )
            )
        })
    }

    fn block_stats(&mut self) -> bool {
        self.rep_sep(Self::block_stat, Self::semis)
    }

    fn block_stat(&mut self) -> bool {
        alt!(
            self,
            self.import_clause(),
            seq!(
                self,
                self.rep0(Self::annotation),
                self.rep0(Self::local_modifier),
                self.def_or_dcl()
            ),
            self.expr(Mode::Sensitive)
        )
    }

    /// A lambda whose body is the rest of the enclosing block.
    fn result_expr(&mut self) -> bool {
        seq!(
            self,
            self.rep1(|p| p.lambda_head(Mode::Sensitive)),
            self.block_body()
        )
    }

    fn block_end(&mut self) -> bool {
        seq!(
            self,
            self.opt(Self::semis),
            self.peek(|p| alt!(p, p.tok("}"), p.kw("case")))
        )
    }
}
