//! Token vocabulary consumed by the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quoting applied to literals that contain shell-special characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum QuoteMode {
    /// No wrapping quotes; used for raw operators like `|` or `2>&1`.
    #[serde(rename = "nq")]
    None,
    /// Double quotes; `"` and `\` are escaped inside.
    #[serde(rename = "wq")]
    Weak,
    /// Single quotes; an embedded `'` becomes `'\''`.
    #[default]
    #[serde(rename = "sq")]
    Strong,
}

impl QuoteMode {
    /// The character(s) wrapped around a literal that needs quoting.
    pub fn quote_str(self) -> &'static str {
        match self {
            QuoteMode::None => "",
            QuoteMode::Weak => "\"",
            QuoteMode::Strong => "'",
        }
    }

    /// Short name used in configuration and the JSON token form.
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteMode::None => "nq",
            QuoteMode::Weak => "wq",
            QuoteMode::Strong => "sq",
        }
    }

    /// Scope `tokens` to this mode: push, switch, emit, pop.
    pub fn wrap<I, T>(self, tokens: I) -> Token
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut group = vec![Token::PushQuote, Token::Mode(self)];
        group.extend(tokens.into_iter().map(Into::into));
        group.push(Token::PopQuote);
        Token::Inline(group)
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a command description.
///
/// Only [`Token::Literal`] produces output. Every other variant steers how
/// the following literals are joined and quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A single shell word.
    Literal(String),
    /// Tokens spliced in place, in order. Groups nest.
    Inline(Vec<Token>),
    /// Suppresses the space before the next literal.
    NoSep,
    /// Switches the active quoting mode.
    Mode(QuoteMode),
    /// Saves the active quoting mode.
    PushQuote,
    /// Restores the most recently saved quoting mode.
    PopQuote,
}

impl Token {
    /// Build a literal from anything printable.
    pub fn literal(value: impl fmt::Display) -> Self {
        Token::Literal(value.to_string())
    }

    /// Build an inline group.
    pub fn inline<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Token::Inline(tokens.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Literal(s.to_owned())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Literal(s)
    }
}

impl From<&String> for Token {
    fn from(s: &String) -> Self {
        Token::Literal(s.clone())
    }
}

impl From<&std::path::Path> for Token {
    fn from(p: &std::path::Path) -> Self {
        Token::Literal(p.to_string_lossy().into_owned())
    }
}

impl From<QuoteMode> for Token {
    fn from(mode: QuoteMode) -> Self {
        Token::Mode(mode)
    }
}

impl From<Vec<Token>> for Token {
    fn from(tokens: Vec<Token>) -> Self {
        Token::Inline(tokens)
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}

macro_rules! literal_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Token {
                fn from(value: $ty) -> Self {
                    Token::Literal(value.to_string())
                }
            }
        )*
    };
}

literal_from_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

// `Debug` keeps the fractional part of whole floats (`1.0`, not `1`).
impl From<f32> for Token {
    fn from(value: f32) -> Self {
        Token::Literal(format!("{value:?}"))
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::Literal(format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_pushes_and_pops() {
        let t = QuoteMode::Weak.wrap(["a", "b"]);
        assert_eq!(
            t,
            Token::Inline(vec![
                Token::PushQuote,
                Token::Mode(QuoteMode::Weak),
                Token::Literal("a".into()),
                Token::Literal("b".into()),
                Token::PopQuote,
            ])
        );
    }

    #[test]
    fn wrap_empty() {
        let t = QuoteMode::None.wrap(Vec::<Token>::new());
        assert_eq!(
            t,
            Token::Inline(vec![
                Token::PushQuote,
                Token::Mode(QuoteMode::None),
                Token::PopQuote
            ])
        );
    }

    #[test]
    fn numbers_become_literals() {
        assert_eq!(Token::from(42), Token::Literal("42".into()));
        assert_eq!(Token::from(-7i64), Token::Literal("-7".into()));
        assert_eq!(Token::from(1.5), Token::Literal("1.5".into()));
    }

    #[test]
    fn whole_floats_keep_fraction() {
        assert_eq!(Token::from(1.0), Token::Literal("1.0".into()));
        assert_eq!(Token::from(-2.0f32), Token::Literal("-2.0".into()));
    }

    #[test]
    fn literal_from_display() {
        assert_eq!(Token::literal('x'), Token::Literal("x".into()));
        assert_eq!(Token::literal(true), Token::Literal("true".into()));
    }

    #[test]
    fn default_mode_is_strong() {
        assert_eq!(QuoteMode::default(), QuoteMode::Strong);
    }
}
