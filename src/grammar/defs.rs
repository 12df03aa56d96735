//! Definitions, templates and the top level.
//!
//! Declaration forms (`val x: Int`, `def f: Int`, `type T <: U`) are folded
//! into the definition rules as optional bodies; the recognizer does not
//! police where a declaration is legal.

use crate::engine::Parser;
use crate::grammar::exprs::Mode;
use crate::{alt, seq};

impl Parser<'_> {
    pub(crate) fn compilation_unit(&mut self) -> bool {
        self.named("CompilationUnit", |p| {
            seq!(
                p,
                p.opt(Self::semis),
                p.opt(Self::top_package_seq),
                p.opt(Self::semis),
                p.opt(Self::top_stat_seq),
                p.opt(Self::semis),
                p.skip_wl(),
                p.eoi()
            )
        })
    }

    fn top_package_seq(&mut self) -> bool {
        self.rep_sep(Self::flat_package_stat, Self::semis)
    }

    /// `package a.b` without a following brace; braced packagings are
    /// ordinary top statements.
    fn flat_package_stat(&mut self) -> bool {
        seq!(
            self,
            self.kw("package"),
            self.qual_id(),
            self.not(|p| p.tok("{"))
        )
    }

    fn top_stat_seq(&mut self) -> bool {
        self.rep_sep(Self::top_stat, Self::semis)
    }

    fn top_stat(&mut self) -> bool {
        self.named("TopStat", |p| {
            alt!(
                p,
                p.packaging(),
                p.package_object(),
                p.import_clause(),
                seq!(
                    p,
                    p.rep0(Self::annotation),
                    p.rep0(Self::modifier),
                    p.def_or_dcl()
                )
            )
        })
    }

    fn packaging(&mut self) -> bool {
        seq!(
            self,
            self.kw("package"),
            self.qual_id(),
            self.tok("{"),
            self.opt(Self::semis),
            self.opt(Self::top_stat_seq),
            self.opt(Self::semis),
            self.tok("}")
        )
    }

    fn package_object(&mut self) -> bool {
        seq!(
            self,
            self.kw("package"),
            self.kw("object"),
            self.object_def()
        )
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    pub(crate) fn tmpl_def(&mut self) -> bool {
        self.named("TmplDef", |p| {
            alt!(
                p,
                seq!(p, p.kw("trait"), p.trait_def()),
                seq!(p, p.opt(|p| p.kw("case")), p.kw("class"), p.class_def()),
                seq!(p, p.opt(|p| p.kw("case")), p.kw("object"), p.object_def())
            )
        })
    }

    fn class_def(&mut self) -> bool {
        seq!(
            self,
            self.id(),
            self.opt(Self::type_arg_list),
            self.rep0(Self::annotation),
            self.opt(Self::access_modifier),
            self.rep0(Self::class_arg_clause),
            self.template_opt()
        )
    }

    fn class_arg_clause(&mut self) -> bool {
        seq!(
            self,
            self.one_newline_max(),
            self.tok("("),
            self.opt(|p| p.kw("implicit")),
            self.opt(|p| p.rep_sep(Self::class_arg, |p| p.tok(","))),
            self.tok(")")
        )
    }

    fn class_arg(&mut self) -> bool {
        seq!(
            self,
            self.rep0(Self::annotation),
            self.opt(|p| {
                seq!(
                    p,
                    p.rep0(Self::modifier),
                    alt!(p, p.kw("val"), p.kw("var"))
                )
            }),
            self.id(),
            self.op(":"),
            self.param_type(),
            self.opt(|p| seq!(p, p.op("="), p.expr(Mode::Insensitive)))
        )
    }

    fn trait_def(&mut self) -> bool {
        seq!(
            self,
            self.id(),
            self.opt(Self::type_arg_list),
            self.template_opt()
        )
    }

    fn object_def(&mut self) -> bool {
        seq!(self, self.id(), self.template_opt())
    }

    fn template_opt(&mut self) -> bool {
        self.opt(|p| {
            alt!(
                p,
                seq!(
                    p,
                    alt!(p, p.kw("extends"), p.op("<:")),
                    p.class_template()
                ),
                p.template_body()
            )
        })
    }

    /// Parents with optional early definitions and constructor arguments,
    /// or a bare template body. Also the shape that follows `new`.
    pub(crate) fn class_template(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.opt(Self::early_defs),
                self.parents(),
                self.opt(Self::template_body)
            ),
            self.template_body()
        )
    }

    fn parents(&mut self) -> bool {
        seq!(
            self,
            self.annot_type(),
            self.rep0(Self::paren_arg_exprs),
            self.rep0(|p| seq!(p, p.kw("with"), p.annot_type()))
        )
    }

    fn paren_arg_exprs(&mut self) -> bool {
        seq!(
            self,
            self.tok("("),
            self.opt(|p| {
                p.rep_sep(|p| p.expr(Mode::Insensitive), |p| p.tok(","))
            }),
            self.tok(")")
        )
    }

    fn early_defs(&mut self) -> bool {
        seq!(
            self,
            self.tok("{"),
            self.opt(Self::semis),
            self.opt(|p| p.rep_sep(Self::early_def, Self::semis)),
            self.opt(Self::semis),
            self.tok("}"),
            self.kw("with")
        )
    }

    fn early_def(&mut self) -> bool {
        seq!(
            self,
            self.rep0(Self::annotation),
            self.rep0(Self::modifier),
            self.val_var_def()
        )
    }

    pub(crate) fn template_body(&mut self) -> bool {
        self.named("TmplBody", |p| {
            seq!(
                p,
                p.tok("{"),
                p.opt(Self::self_type),
                p.opt(Self::semis),
                p.opt(|p| p.rep_sep(Self::template_stat, Self::semis)),
                p.opt(Self::semis),
                p.tok("}")
            )
        })
    }

    fn template_stat(&mut self) -> bool {
        alt!(
            self,
            self.import_clause(),
            seq!(
                self,
                self.rep0(Self::annotation),
                self.rep0(Self::modifier),
                self.def_or_dcl()
            ),
            self.expr(Mode::Sensitive)
        )
    }

    fn self_type(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.kw("this"),
                self.op(":"),
                self.infix_type(),
                self.right_arrow()
            ),
            seq!(
                self,
                alt!(self, self.id(), self.underscore()),
                self.opt(|p| seq!(p, p.op(":"), p.infix_type())),
                self.right_arrow()
            )
        )
    }

    // ------------------------------------------------------------------
    // Member definitions
    // ------------------------------------------------------------------

    pub(crate) fn def_or_dcl(&mut self) -> bool {
        self.named("Def", |p| {
            alt!(
                p,
                p.fun_def(),
                p.val_var_def(),
                p.type_def(),
                p.tmpl_def()
            )
        })
    }

    pub(crate) fn fun_def(&mut self) -> bool {
        seq!(
            self,
            self.kw("def"),
            self.fun_sig(),
            self.opt(|p| seq!(p, p.op(":"), p.typ())),
            self.opt(Self::fun_body)
        )
    }

    fn fun_sig(&mut self) -> bool {
        alt!(
            self,
            seq!(self, self.kw("this"), self.rep0(Self::param_clause)),
            seq!(
                self,
                self.id(),
                self.opt(Self::type_arg_list),
                self.rep0(Self::param_clause)
            )
        )
    }

    fn param_clause(&mut self) -> bool {
        seq!(
            self,
            self.one_newline_max(),
            self.tok("("),
            self.opt(|p| p.kw("implicit")),
            self.opt(|p| p.rep_sep(Self::param, |p| p.tok(","))),
            self.tok(")")
        )
    }

    fn param(&mut self) -> bool {
        seq!(
            self,
            self.rep0(Self::annotation),
            self.id(),
            self.opt(|p| seq!(p, p.op(":"), p.param_type())),
            self.opt(|p| seq!(p, p.op("="), p.expr(Mode::Insensitive)))
        )
    }

    fn fun_body(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.op("="),
                self.opt(|p| p.kw("macro")),
                self.expr(Mode::Sensitive)
            ),
            seq!(
                self,
                self.one_newline_max(),
                self.tok("{"),
                self.block_body(),
                self.tok("}")
            )
        )
    }

    pub(crate) fn val_var_def(&mut self) -> bool {
        seq!(
            self,
            alt!(self, self.kw("val"), self.kw("var")),
            self.rep_sep(Self::pattern2, |p| p.tok(",")),
            self.opt(|p| seq!(p, p.op(":"), p.typ())),
            self.opt(|p| seq!(p, p.op("="), p.expr(Mode::Sensitive)))
        )
    }

    pub(crate) fn type_def(&mut self) -> bool {
        seq!(
            self,
            self.kw("type"),
            self.id(),
            self.opt(Self::type_arg_list),
            alt!(
                self,
                seq!(self, self.op("="), self.typ()),
                self.type_bounds()
            )
        )
    }

    /// Statements allowed in a refinement: member declarations only.
    pub(crate) fn refine_stat(&mut self) -> bool {
        alt!(
            self,
            self.type_def(),
            self.val_var_def(),
            self.fun_def()
        )
    }

    pub(crate) fn existential_dcl(&mut self) -> bool {
        alt!(self, self.type_def(), self.val_var_def())
    }

    // ------------------------------------------------------------------
    // Imports, annotations, modifiers
    // ------------------------------------------------------------------

    pub(crate) fn import_clause(&mut self) -> bool {
        seq!(
            self,
            self.kw("import"),
            self.rep_sep(Self::import_expr, |p| p.tok(","))
        )
    }

    fn import_expr(&mut self) -> bool {
        seq!(
            self,
            self.stable_id(),
            self.opt(|p| {
                seq!(
                    p,
                    p.tok("."),
                    alt!(p, p.underscore(), p.import_selectors())
                )
            })
        )
    }

    fn import_selectors(&mut self) -> bool {
        seq!(
            self,
            self.tok("{"),
            self.rep0(|p| seq!(p, p.import_selector(), p.tok(","))),
            alt!(self, self.import_selector(), self.underscore()),
            self.tok("}")
        )
    }

    fn import_selector(&mut self) -> bool {
        seq!(
            self,
            self.id(),
            self.opt(|p| {
                seq!(
                    p,
                    p.right_arrow(),
                    alt!(p, p.id(), p.underscore())
                )
            })
        )
    }

    pub(crate) fn annotation(&mut self) -> bool {
        seq!(
            self,
            self.op("@"),
            self.simple_type(),
            self.rep0(Self::paren_arg_exprs)
        )
    }

    pub(crate) fn modifier(&mut self) -> bool {
        alt!(
            self,
            self.local_modifier(),
            self.kw("override"),
            self.access_modifier()
        )
    }

    pub(crate) fn local_modifier(&mut self) -> bool {
        alt!(
            self,
            self.kw("abstract"),
            self.kw("final"),
            self.kw("sealed"),
            self.kw("implicit"),
            self.kw("lazy")
        )
    }

    fn access_modifier(&mut self) -> bool {
        seq!(
            self,
            alt!(self, self.kw("private"), self.kw("protected")),
            self.opt(|p| {
                seq!(
                    p,
                    p.tok("["),
                    alt!(p, p.kw("this"), p.id()),
                    p.tok("]")
                )
            })
        )
    }
}
