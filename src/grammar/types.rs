//! The type grammar: simple through function and existential types.

use crate::engine::Parser;
use crate::{alt, seq};

impl Parser<'_> {
    pub(crate) fn typ(&mut self) -> bool {
        self.named("Type", |p| seq!(p, p.type_start(), p.type_bounds()))
    }

    fn type_start(&mut self) -> bool {
        alt!(
            self,
            self.underscore(),
            seq!(self, self.fn_arg_types(), self.right_arrow(), self.typ()),
            seq!(
                self,
                self.infix_type(),
                self.opt(|p| {
                    alt!(
                        p,
                        seq!(p, p.right_arrow(), p.typ()),
                        p.existential_clause()
                    )
                })
            )
        )
    }

    fn fn_arg_types(&mut self) -> bool {
        seq!(
            self,
            self.tok("("),
            self.opt(|p| p.rep_sep(Self::param_type, |p| p.tok(","))),
            self.tok(")")
        )
    }

    /// A parameter type: by-name (`=> T`), repeated (`T*`) or plain.
    pub(crate) fn param_type(&mut self) -> bool {
        alt!(
            self,
            seq!(self, self.right_arrow(), self.typ()),
            seq!(self, self.typ(), self.opt(|p| p.op("*")))
        )
    }

    pub(crate) fn infix_type(&mut self) -> bool {
        self.named("InfixType", |p| {
            seq!(
                p,
                p.compound_type(),
                p.rep0(|p| seq!(p, p.id(), p.one_newline_max(), p.compound_type()))
            )
        })
    }

    pub(crate) fn compound_type(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.annot_type(),
                self.rep0(|p| seq!(p, p.kw("with"), p.annot_type())),
                self.opt(Self::refinement)
            ),
            self.refinement()
        )
    }

    fn refinement(&mut self) -> bool {
        seq!(
            self,
            self.one_newline_max(),
            self.tok("{"),
            self.opt(Self::semis),
            self.opt(|p| p.rep_sep(Self::refine_stat, Self::semis)),
            self.opt(Self::semis),
            self.tok("}")
        )
    }

    pub(crate) fn annot_type(&mut self) -> bool {
        seq!(self, self.simple_type(), self.rep0(Self::annotation))
    }

    pub(crate) fn simple_type(&mut self) -> bool {
        seq!(
            self,
            alt!(
                self,
                self.product_type(),
                self.singleton_type(),
                self.stable_id()
            ),
            self.rep0(|p| alt!(p, p.type_args(), seq!(p, p.op("#"), p.id())))
        )
    }

    fn product_type(&mut self) -> bool {
        seq!(
            self,
            self.tok("("),
            self.opt(|p| p.rep_sep(Self::typ, |p| p.tok(","))),
            self.tok(")")
        )
    }

    fn singleton_type(&mut self) -> bool {
        seq!(self, self.stable_id(), self.tok("."), self.kw("type"))
    }

    pub(crate) fn type_args(&mut self) -> bool {
        seq!(
            self,
            self.tok("["),
            self.rep_sep(Self::typ, |p| p.tok(",")),
            self.tok("]")
        )
    }

    /// `>: Lo <: Hi`, both halves optional.
    pub(crate) fn type_bounds(&mut self) -> bool {
        seq!(
            self,
            self.opt(|p| seq!(p, p.op(">:"), p.typ())),
            self.opt(|p| seq!(p, p.op("<:"), p.typ()))
        )
    }

    fn existential_clause(&mut self) -> bool {
        seq!(
            self,
            self.kw("forSome"),
            self.tok("{"),
            self.rep_sep(Self::existential_dcl, |p| p.opt(Self::semis)),
            self.opt(Self::semis),
            self.tok("}")
        )
    }

    /// Declaration-side type parameters: variance, nested parameter lists,
    /// bounds, then view (`<%`) and context (`:`) bounds.
    pub(crate) fn type_arg_list(&mut self) -> bool {
        seq!(
            self,
            self.tok("["),
            self.rep_sep(Self::type_arg, |p| p.tok(",")),
            self.tok("]")
        )
    }

    fn type_arg(&mut self) -> bool {
        seq!(
            self,
            self.rep0(Self::annotation),
            self.opt(|p| alt!(p, p.op("+"), p.op("-"))),
            alt!(self, self.id(), self.underscore()),
            self.opt(Self::type_arg_list),
            self.type_bounds(),
            self.rep0(|p| seq!(p, p.op("<%"), p.typ())),
            self.rep0(|p| seq!(p, p.op(":"), p.typ()))
        )
    }
}
