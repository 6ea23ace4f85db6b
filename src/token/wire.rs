//! JSON form of a token sequence, read by the `shcmd` binary.
//!
//! Scalars are literals and arrays are inline groups. Everything else is an
//! object naming what it builds:
//!
//! ```json
//! ["grep", {"quote": "wq", "tokens": ["a b"]}, "src",
//!  {"op": "pipe"}, "wc", "-l", {"redirect": "2>", "fd": 1}]
//! ```

use serde::{Deserialize, Serialize};

use super::ops;
use super::types::{QuoteMode, Token};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Push,
    Pop,
    NoSep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Pipe,
    #[serde(alias = "background")]
    Bg,
    Quiet,
    Silent,
}

/// A token as written in JSON. Convert with [`TokenSpec::into_token`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TokenSpec {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Group(Vec<TokenSpec>),
    Mode {
        mode: QuoteMode,
    },
    Marker {
        marker: Marker,
    },
    Scoped {
        quote: QuoteMode,
        tokens: Vec<TokenSpec>,
    },
    RedirectFd {
        redirect: String,
        fd: u32,
    },
    Redirect {
        redirect: String,
        target: Box<TokenSpec>,
    },
    Append {
        append: Box<TokenSpec>,
    },
    Operator {
        op: Operator,
    },
}

impl TokenSpec {
    /// Build the token, validating redirect operators.
    pub fn into_token(self) -> Result<Token> {
        let token = match self {
            TokenSpec::Text(s) => Token::Literal(s),
            TokenSpec::Integer(n) => Token::from(n),
            TokenSpec::Float(x) => Token::from(x),
            TokenSpec::Bool(b) => Token::from(b),
            TokenSpec::Group(items) => Token::Inline(convert_all(items)?),
            TokenSpec::Mode { mode } => Token::Mode(mode),
            TokenSpec::Marker { marker } => match marker {
                Marker::Push => Token::PushQuote,
                Marker::Pop => Token::PopQuote,
                Marker::NoSep => Token::NoSep,
            },
            TokenSpec::Scoped { quote, tokens } => quote.wrap(convert_all(tokens)?),
            TokenSpec::RedirectFd { redirect, fd } => ops::redirect_fd(&redirect, fd)?,
            TokenSpec::Redirect { redirect, target } => {
                ops::redirect(&redirect, target.into_token()?)?
            }
            TokenSpec::Append { append } => ops::append(append.into_token()?),
            TokenSpec::Operator { op } => match op {
                Operator::Pipe => ops::pipe(),
                Operator::Bg => ops::background(),
                Operator::Quiet => ops::quiet(),
                Operator::Silent => ops::silent(),
            },
        };
        Ok(token)
    }
}

fn convert_all(items: Vec<TokenSpec>) -> Result<Vec<Token>> {
    items.into_iter().map(TokenSpec::into_token).collect()
}

/// Decode a JSON array (or single value) into tokens.
pub fn from_json(input: &str) -> Result<Vec<Token>> {
    match serde_json::from_str::<TokenSpec>(input)? {
        TokenSpec::Group(items) => convert_all(items),
        single => Ok(vec![single.into_token()?]),
    }
}
