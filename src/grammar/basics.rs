//! Character classes, comments and the two skip policies.
//!
//! WS skips spaces, tabs and comments but never a newline token; WL also
//! crosses newlines. Tokens always skip WL before matching — statement
//! sensitivity comes from the explicit `no_newline`/`one_newline_max`
//! guards, not from the skip.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::engine::Parser;
use crate::{alt, seq};

fn to_char(u: u16) -> Option<char> {
    char::from_u32(u32::from(u))
}

pub(crate) fn is_ws_char(u: u16) -> bool {
    u == u16::from(b' ') || u == u16::from(b'\t')
}

pub(crate) fn is_digit(u: u16) -> bool {
    (u16::from(b'0')..=u16::from(b'9')).contains(&u)
}

pub(crate) fn is_hex_digit(u: u16) -> bool {
    is_digit(u)
        || (u16::from(b'a')..=u16::from(b'f')).contains(&u)
        || (u16::from(b'A')..=u16::from(b'F')).contains(&u)
}

/// Identifier-start characters: Lu, Ll, Lt, Lo, Nl plus `$` and `_`.
pub(crate) fn is_letter(u: u16) -> bool {
    if u == u16::from(b'$') || u == u16::from(b'_') {
        return true;
    }
    match to_char(u) {
        Some(c) => matches!(
            c.general_category(),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::LetterNumber
        ),
        None => false,
    }
}

pub(crate) fn is_id_part(u: u16) -> bool {
    is_letter(u) || is_digit(u)
}

/// Printable ASCII operator symbols plus the Sm/So Unicode categories.
pub(crate) fn is_op_char(u: u16) -> bool {
    if u < 128 {
        return b"!#$%&*+-/:<=>?@\\^|~".contains(&(u as u8));
    }
    match to_char(u) {
        Some(c) => matches!(
            c.general_category(),
            GeneralCategory::MathSymbol | GeneralCategory::OtherSymbol
        ),
        None => false,
    }
}

impl Parser<'_> {
    pub(crate) fn newline(&mut self) -> bool {
        self.quiet(|p| alt!(p, p.lit("\r\n"), p.lit("\n")))
    }

    /// `//` to end of line, or `/*` ... `*/` with nesting.
    pub(crate) fn comment(&mut self) -> bool {
        self.quiet(|p| alt!(p, p.line_comment(), p.block_comment()))
    }

    fn line_comment(&mut self) -> bool {
        seq!(
            self,
            self.lit("//"),
            self.rep0(|p| p.unit_if(|u| u != u16::from(b'\n') && u != u16::from(b'\r')))
        )
    }

    fn block_comment(&mut self) -> bool {
        seq!(
            self,
            self.lit("/*"),
            self.rep0(|p| {
                alt!(
                    p,
                    p.block_comment(),
                    seq!(p, p.not(|p| p.lit("*/")), p.unit_if(|_| true))
                )
            }),
            self.lit("*/")
        )
    }

    /// WS: whitespace and comments, never a newline token.
    pub(crate) fn skip_ws(&mut self) -> bool {
        self.rep0(|p| alt!(p, p.unit_if(is_ws_char), p.comment()))
    }

    /// WL: whitespace, comments and newlines.
    pub(crate) fn skip_wl(&mut self) -> bool {
        self.rep0(|p| alt!(p, p.unit_if(is_ws_char), p.comment(), p.newline()))
    }

    /// One statement separator: an explicit `;` or a newline run.
    pub(crate) fn semi(&mut self) -> bool {
        seq!(
            self,
            self.skip_ws(),
            alt!(
                self,
                self.ch(';'),
                self.rep1(|p| seq!(p, p.newline(), p.skip_ws()))
            )
        )
    }

    pub(crate) fn semis(&mut self) -> bool {
        self.rep1(Self::semi)
    }

    /// WS, then asserts the next token does not start on a new line.
    pub(crate) fn no_newline(&mut self) -> bool {
        seq!(self, self.skip_ws(), self.not(Self::newline))
    }

    /// Allows at most one newline before the next token, which must not
    /// itself be followed by another newline.
    pub(crate) fn one_newline_max(&mut self) -> bool {
        seq!(
            self,
            self.skip_ws(),
            self.opt(Self::newline),
            self.skip_ws(),
            self.not(Self::newline)
        )
    }
}
