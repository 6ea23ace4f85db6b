//! Token sequence to shell text.
//!
//! Tokens are walked left to right off a reversed work stack, so nested
//! [`Token::Inline`] groups are spliced without recursion. Each literal is
//! escaped for the active [`QuoteMode`] and wrapped in quotes only when one
//! of its characters (or its emptiness) requires it.

use crate::error::{Error, Result};
use crate::token::{QuoteMode, Token};

/// Two-character escape for the control characters both the renderer and
/// the escape codec rewrite.
pub(crate) fn control_escape(c: char) -> Option<&'static str> {
    match c {
        '\x07' => Some("\\a"),
        '\x08' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\x0b' => Some("\\v"),
        '\x0c' => Some("\\f"),
        '\r' => Some("\\r"),
        _ => None,
    }
}

/// Characters that force a literal into quotes.
fn is_special(c: char) -> bool {
    matches!(
        c,
        ' ' | '"'
            | '#'
            | '$'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '['
            | '\\'
            | ']'
            | '`'
            | '{'
            | '|'
            | '}'
            | '~'
    )
}

/// Escape one literal for `mode` and append it to `out`.
fn push_literal(out: &mut String, literal: &str, mode: QuoteMode) {
    let mut buf = String::with_capacity(literal.len());
    let mut need_quote = literal.is_empty();

    for c in literal.chars() {
        if let Some(esc) = control_escape(c) {
            need_quote = true;
            buf.push_str(esc);
        } else if is_special(c) {
            need_quote = true;
            match (c, mode) {
                ('\\', _) => buf.push_str("\\\\"),
                ('"', QuoteMode::Weak) => buf.push_str("\\\""),
                ('\'', QuoteMode::Strong) => buf.push_str("'\\''"),
                _ => buf.push(c),
            }
        } else {
            buf.push(c);
        }
    }

    if need_quote {
        let q = mode.quote_str();
        out.push_str(q);
        out.push_str(&buf);
        out.push_str(q);
    } else {
        out.push_str(&buf);
    }
}

/// Render tokens into a single shell command string.
///
/// Literals are separated by one space unless a [`Token::NoSep`] precedes
/// them. Quoting starts in [`QuoteMode::Strong`].
///
/// ```
/// use shcmd::{render, QuoteMode, Token};
///
/// let cmd = render(["echo", "it's", "fine"]).unwrap();
/// assert_eq!(cmd, r"echo 'it'\''s' fine");
///
/// let grep = QuoteMode::Weak.wrap(["grep", "a b"]);
/// let cmd = render([Token::from("ls"), shcmd::pipe(), grep]).unwrap();
/// assert_eq!(cmd, r#"ls | grep "a b""#);
/// ```
pub fn render<I, T>(tokens: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<Token>,
{
    let mut pending: Vec<Token> = tokens.into_iter().map(Into::into).collect();
    pending.reverse();

    let mut stack: Vec<QuoteMode> = Vec::new();
    let mut mode = QuoteMode::Strong;
    let mut out = String::new();
    // Separator state: whether anything (a literal or a NoSep) has been
    // emitted, and whether the last emission was a NoSep.
    let mut started = false;
    let mut glue = false;
    let mut words = 0usize;

    while let Some(token) = pending.pop() {
        match token {
            Token::Inline(group) => pending.extend(group.into_iter().rev()),
            Token::NoSep => {
                started = true;
                glue = true;
            }
            Token::Mode(m) => mode = m,
            Token::PushQuote => stack.push(mode),
            Token::PopQuote => mode = stack.pop().ok_or(Error::QuotingStackUnderflow)?,
            Token::Literal(literal) => {
                if started && !glue {
                    out.push(' ');
                }
                push_literal(&mut out, &literal, mode);
                started = true;
                glue = false;
                words += 1;
            }
        }
    }

    log::trace!("rendered {words} literal(s) into {} bytes", out.len());
    Ok(out)
}

/// Build a `Vec<Token>` from heterogeneous values.
///
/// ```
/// use shcmd::{pipe, render, tokens};
///
/// let cmd = render(tokens!["cat", "a file", pipe(), "wc", "-l"]).unwrap();
/// assert_eq!(cmd, "cat 'a file' | wc -l");
/// ```
#[macro_export]
macro_rules! tokens {
    () => {
        ::std::vec::Vec::<$crate::Token>::new()
    };
    ($($tok:expr),+ $(,)?) => {
        ::std::vec![$($crate::Token::from($tok)),+]
    };
}
