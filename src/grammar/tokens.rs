//! The token layer: identifiers, keywords and literals.
//!
//! Every token skips WL first and then matches atomically, so error
//! reports name whole tokens rather than single characters. Keyword
//! matches are anchored: the characters must equal the keyword and the
//! next character must not continue an identifier.

use crate::engine::Parser;
use crate::grammar::basics::{is_digit, is_hex_digit, is_id_part, is_letter, is_op_char};
use crate::{alt, seq};

const KEYWORDS: &[&str] = &[
    "abstract", "case", "catch", "class", "def", "do", "else", "extends", "false", "final",
    "finally", "for", "forSome", "if", "implicit", "import", "lazy", "macro", "match", "new",
    "null", "object", "override", "package", "private", "protected", "return", "sealed", "super",
    "this", "throw", "trait", "true", "try", "type", "val", "var", "while", "with", "yield",
];

const RESERVED_OPS: &[&str] = &[
    "=", "=>", "<-", "<:", ">:", "<%", "#", "@", ":", "_", "←", "⇒",
];

pub(crate) fn is_reserved(word: &str) -> bool {
    KEYWORDS.contains(&word) || RESERVED_OPS.contains(&word)
}

impl Parser<'_> {
    /// A fixed token such as `(` or `,`.
    pub(crate) fn tok(&mut self, s: &'static str) -> bool {
        seq!(self, self.skip_wl(), self.atomic(s, |p| p.lit(s)))
    }

    /// An alphabetic keyword, anchored against identifier continuation.
    pub(crate) fn kw(&mut self, word: &'static str) -> bool {
        seq!(
            self,
            self.skip_wl(),
            self.atomic(word, |p| {
                seq!(p, p.lit(word), p.not(|p| p.unit_if(is_id_part)))
            })
        )
    }

    /// An operator token, anchored against further operator characters.
    pub(crate) fn op(&mut self, sym: &'static str) -> bool {
        seq!(
            self,
            self.skip_wl(),
            self.atomic(sym, |p| {
                seq!(p, p.lit(sym), p.not(|p| p.unit_if(is_op_char)))
            })
        )
    }

    pub(crate) fn right_arrow(&mut self) -> bool {
        alt!(self, self.op("=>"), self.op("⇒"))
    }

    pub(crate) fn left_arrow(&mut self) -> bool {
        alt!(self, self.op("<-"), self.op("←"))
    }

    /// The wildcard token. `_foo` stays an identifier, `_*` is two tokens.
    pub(crate) fn underscore(&mut self) -> bool {
        seq!(
            self,
            self.skip_wl(),
            self.atomic("_", |p| {
                seq!(p, p.ch('_'), p.not(|p| p.unit_if(is_id_part)))
            })
        )
    }

    // ------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------

    /// Letter start, letter/digit rest, optional `_`-prefixed operator tail
    /// (`foo_+`, `x_=`).
    pub(crate) fn plain_id_shape(&mut self) -> bool {
        if !self.unit_if(is_letter) {
            return false;
        }
        self.rep0(|p| p.unit_if(is_id_part));
        let before = self.cursor();
        if before > 0 && self.input().unit_at(before - 1) == Some(u16::from(b'_')) {
            self.rep0(|p| p.unit_if(is_op_char));
        }
        true
    }

    fn op_id_shape(&mut self) -> bool {
        self.rep1(|p| p.unit_if(is_op_char))
    }

    fn backtick_id_shape(&mut self) -> bool {
        seq!(
            self,
            self.ch('`'),
            self.rep1(|p| {
                p.unit_if(|u| u != u16::from(b'`') && u != u16::from(b'\n') && u != u16::from(b'\r'))
            }),
            self.ch('`')
        )
    }

    /// Any identifier shape that is not a reserved word. Backquoted names
    /// are exempt from the reserved check.
    pub(crate) fn id(&mut self) -> bool {
        seq!(
            self,
            self.skip_wl(),
            self.atomic("Id", |p| {
                let captured = p.capture(|p| {
                    alt!(p, p.backtick_id_shape(), p.plain_id_shape(), p.op_id_shape())
                });
                match captured {
                    Some(text) => text.starts_with('`') || !is_reserved(&text),
                    None => false,
                }
            })
        )
    }

    /// A plain identifier starting with a lowercase letter; used by the
    /// pattern grammar to spot binders.
    pub(crate) fn var_id(&mut self) -> bool {
        seq!(
            self,
            self.skip_wl(),
            self.atomic("VarId", |p| {
                match p.capture(Self::plain_id_shape) {
                    Some(text) => {
                        !is_reserved(&text)
                            && text.chars().next().is_some_and(char::is_lowercase)
                    }
                    None => false,
                }
            })
        )
    }

    pub(crate) fn qual_id(&mut self) -> bool {
        self.rep_sep(Self::id, |p| p.tok("."))
    }

    /// `a.b.c`, possibly routed through `this` or `super[Qual]`.
    pub(crate) fn stable_id(&mut self) -> bool {
        self.named("StableId", |p| {
            alt!(
                p,
                seq!(
                    p,
                    p.rep0(|p| seq!(p, p.id(), p.tok("."))),
                    p.this_or_super(),
                    p.rep0(|p| seq!(p, p.tok("."), p.id()))
                ),
                seq!(p, p.id(), p.rep0(|p| seq!(p, p.tok("."), p.id())))
            )
        })
    }

    fn this_or_super(&mut self) -> bool {
        alt!(
            self,
            self.kw("this"),
            seq!(
                self,
                self.kw("super"),
                self.opt(|p| seq!(p, p.tok("["), p.id(), p.tok("]")))
            )
        )
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    pub(crate) fn literal(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.skip_wl(),
                self.atomic("number", |p| {
                    seq!(
                        p,
                        p.opt(|p| p.ch('-')),
                        alt!(p, p.float_shape(), p.int_shape())
                    )
                })
            ),
            self.kw("true"),
            self.kw("false"),
            self.kw("null"),
            seq!(
                self,
                self.skip_wl(),
                self.atomic("character literal", Self::char_shape)
            ),
            self.string_literal(),
            seq!(self, self.skip_wl(), self.atomic("symbol", Self::symbol_shape))
        )
    }

    fn int_shape(&mut self) -> bool {
        seq!(
            self,
            alt!(
                self,
                seq!(
                    self,
                    alt!(self, self.lit("0x"), self.lit("0X")),
                    self.rep1(|p| p.unit_if(is_hex_digit))
                ),
                self.rep1(|p| p.unit_if(is_digit))
            ),
            self.opt(|p| p.unit_if(|u| u == u16::from(b'L') || u == u16::from(b'l')))
        )
    }

    fn float_shape(&mut self) -> bool {
        alt!(
            self,
            seq!(
                self,
                self.ch('.'),
                self.rep1(|p| p.unit_if(is_digit)),
                self.opt(Self::exponent_shape),
                self.opt(|p| p.unit_if(is_float_suffix))
            ),
            seq!(
                self,
                self.rep1(|p| p.unit_if(is_digit)),
                self.ch('.'),
                self.not(|p| p.unit_if(is_letter)),
                self.rep0(|p| p.unit_if(is_digit)),
                self.opt(Self::exponent_shape),
                self.opt(|p| p.unit_if(is_float_suffix))
            ),
            seq!(
                self,
                self.rep1(|p| p.unit_if(is_digit)),
                self.exponent_shape(),
                self.opt(|p| p.unit_if(is_float_suffix))
            ),
            seq!(
                self,
                self.rep1(|p| p.unit_if(is_digit)),
                self.unit_if(is_float_suffix)
            )
        )
    }

    fn exponent_shape(&mut self) -> bool {
        seq!(
            self,
            self.unit_if(|u| u == u16::from(b'e') || u == u16::from(b'E')),
            self.opt(|p| p.unit_if(|u| u == u16::from(b'+') || u == u16::from(b'-'))),
            self.rep1(|p| p.unit_if(is_digit))
        )
    }

    fn char_shape(&mut self) -> bool {
        seq!(
            self,
            self.ch('\''),
            alt!(
                self,
                self.unicode_escape_shape(),
                self.escape_shape(),
                self.unit_if(|u| {
                    u != u16::from(b'\'')
                        && u != u16::from(b'\\')
                        && u != u16::from(b'\n')
                        && u != u16::from(b'\r')
                })
            ),
            self.ch('\'')
        )
    }

    fn escape_shape(&mut self) -> bool {
        seq!(
            self,
            self.ch('\\'),
            self.unit_if(|u| u != u16::from(b'\n') && u != u16::from(b'\r'))
        )
    }

    fn unicode_escape_shape(&mut self) -> bool {
        seq!(
            self,
            self.ch('\\'),
            self.rep1(|p| p.unit_if(|u| u == u16::from(b'u'))),
            self.unit_if(is_hex_digit),
            self.unit_if(is_hex_digit),
            self.unit_if(is_hex_digit),
            self.unit_if(is_hex_digit)
        )
    }

    /// Plain or triple-quoted, optionally with an interpolation prefix.
    /// Interpolated interiors are consumed as raw text, never parsed.
    pub(crate) fn string_literal(&mut self) -> bool {
        seq!(
            self,
            self.skip_wl(),
            self.atomic("string literal", |p| {
                seq!(
                    p,
                    p.opt(|p| seq!(p, p.plain_id_shape(), p.peek(|p| p.ch('"')))),
                    alt!(p, p.triple_string_shape(), p.plain_string_shape())
                )
            })
        )
    }

    fn triple_string_shape(&mut self) -> bool {
        seq!(
            self,
            self.lit("\"\"\""),
            self.rep0(|p| {
                seq!(
                    p,
                    p.opt(|p| p.ch('"')),
                    p.opt(|p| p.ch('"')),
                    p.unit_if(|u| u != u16::from(b'"'))
                )
            }),
            self.lit("\"\"\""),
            self.rep0(|p| p.ch('"'))
        )
    }

    fn plain_string_shape(&mut self) -> bool {
        seq!(
            self,
            self.ch('"'),
            self.rep0(|p| {
                alt!(
                    p,
                    p.unicode_escape_shape(),
                    p.escape_shape(),
                    p.unit_if(|u| {
                        u != u16::from(b'"')
                            && u != u16::from(b'\\')
                            && u != u16::from(b'\n')
                            && u != u16::from(b'\r')
                    })
                )
            }),
            self.ch('"')
        )
    }

    fn symbol_shape(&mut self) -> bool {
        seq!(self, self.ch('\''), self.plain_id_shape())
    }
}

fn is_float_suffix(u: u16) -> bool {
    u == u16::from(b'f') || u == u16::from(b'F') || u == u16::from(b'd') || u == u16::from(b'D')
}
