//! Pre-built operator tokens: pipes, background jobs and redirections.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{QuoteMode, Token};
use crate::error::{Error, Result};

/// `[n]<`, `[n]>`, `[n]<>`, `[n]>>`, `[n]>|`
static REDIRECT_OP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]?([<>]>?|>\|)$").expect("valid regex"));

/// `[n]<` or `[n]>` followed by `&fd`
static DUPLICATE_OP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]?[<>]$").expect("valid regex"));

/// Null device used by [`quiet`].
pub const NULL_DEVICE: &str = "/dev/null";

/// `|`
pub fn pipe() -> Token {
    QuoteMode::None.wrap(["|"])
}

/// `&`
pub fn background() -> Token {
    QuoteMode::None.wrap(["&"])
}

/// Redirect with operator `op` to a file target, e.g. `2>` `err.log`.
///
/// The target is rendered glued to the operator under the caller's quoting
/// mode, so `redirect(">", "my file")` renders as `>'my file'`.
pub fn redirect(op: &str, target: impl Into<Token>) -> Result<Token> {
    if !REDIRECT_OP.is_match(op) {
        return Err(Error::InvalidRedirectSyntax(op.to_owned()));
    }
    Ok(Token::Inline(vec![
        QuoteMode::None.wrap([op]),
        Token::NoSep,
        target.into(),
    ]))
}

/// Duplicate onto descriptor `fd`, e.g. `redirect_fd("2>", 1)` is `2>&1`.
pub fn redirect_fd(op: &str, fd: u32) -> Result<Token> {
    if !DUPLICATE_OP.is_match(op) {
        return Err(Error::InvalidRedirectSyntax(op.to_owned()));
    }
    if fd > 9 {
        return Err(Error::InvalidDescriptor(fd));
    }
    Ok(QuoteMode::None.wrap([format!("{op}&{fd}")]))
}

/// `>target`
pub fn redirect_to(target: impl Into<Token>) -> Token {
    Token::Inline(vec![
        QuoteMode::None.wrap([">"]),
        Token::NoSep,
        target.into(),
    ])
}

/// `>>target`
pub fn append(target: impl Into<Token>) -> Token {
    Token::Inline(vec![
        QuoteMode::None.wrap([">>"]),
        Token::NoSep,
        target.into(),
    ])
}

/// Discard stdout: `>/dev/null`.
pub fn quiet() -> Token {
    redirect_to(NULL_DEVICE)
}

/// Discard stdout and stderr: `>/dev/null 2>&1`.
pub fn silent() -> Token {
    Token::Inline(vec![
        quiet(),
        QuoteMode::None.wrap(["2>&1"]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_accepts_valid_ops() {
        for op in [">", "<", ">>", "<>", "2>", "2>>", "0<", "0<>", ">|", "1>|"] {
            assert!(redirect(op, "f").is_ok(), "op: {op}");
        }
    }

    #[test]
    fn redirect_rejects_invalid_ops() {
        for op in ["", "12>", ">>>", "<<", "2<<", "&>", "a>", "|", "<|", "> ", "2"] {
            assert!(
                matches!(redirect(op, "f"), Err(Error::InvalidRedirectSyntax(_))),
                "op: {op}"
            );
        }
    }

    #[test]
    fn redirect_fd_rejects_append_form() {
        assert!(matches!(
            redirect_fd(">>", 1),
            Err(Error::InvalidRedirectSyntax(_))
        ));
        assert!(matches!(
            redirect_fd(">|", 1),
            Err(Error::InvalidRedirectSyntax(_))
        ));
    }

    #[test]
    fn redirect_fd_rejects_two_digit_descriptor() {
        assert!(matches!(redirect_fd("2>", 10), Err(Error::InvalidDescriptor(10))));
    }

    #[test]
    fn redirect_fd_checks_syntax_first() {
        assert!(matches!(
            redirect_fd("12>", 10),
            Err(Error::InvalidRedirectSyntax(_))
        ));
    }

    #[test]
    fn redirect_to_matches_redirect() {
        assert_eq!(redirect(">", "out").unwrap(), redirect_to("out"));
        assert_eq!(redirect(">>", "out").unwrap(), append("out"));
    }

    #[test]
    fn silent_matches_fd_builder() {
        let Token::Inline(parts) = silent() else {
            panic!("silent must be an inline group");
        };
        assert_eq!(parts[0], quiet());
        assert_eq!(parts[1], redirect_fd("2>", 1).unwrap());
    }
}
