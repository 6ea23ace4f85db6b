//! Printable, shell-embeddable renditions of arbitrary bytes or text.
//!
//! Control characters become their two-character C escapes, printable ASCII
//! passes through, and everything else is escaped numerically: octal
//! (`\0OOO`) by default, or hex/unicode inside an ANSI-C quoted `$'…'`
//! literal in bash mode.

pub mod encoding;

pub use encoding::Encoding;

use std::fmt;
use std::fmt::Write as _;

use crate::error::Result;
use crate::render::control_escape;
use crate::token::{QuoteMode, Token};

/// Options for [`escape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EscapeOptions {
    /// Byte encoding for text input; `None` picks [`Encoding::Unicode`] in
    /// bash mode and [`Encoding::Utf8`] otherwise.
    pub encoding: Option<Encoding>,
    /// Produce an ANSI-C quoted literal when escaping was needed.
    pub bash: bool,
}

impl EscapeOptions {
    /// Bash mode with the default encoding.
    pub fn bash() -> Self {
        Self {
            encoding: None,
            bash: true,
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    fn resolved_encoding(&self) -> Encoding {
        match self.encoding {
            Some(e) => e,
            None if self.bash => Encoding::Unicode,
            None => Encoding::Utf8,
        }
    }
}

/// Result of [`escape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Escaped {
    /// Escaped text without surrounding quotes.
    Plain(String),
    /// A complete `$'…'` literal.
    AnsiC(String),
}

impl Escaped {
    pub fn as_str(&self) -> &str {
        match self {
            Escaped::Plain(s) | Escaped::AnsiC(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Escaped::Plain(s) | Escaped::AnsiC(s) => s,
        }
    }

    pub fn is_ansi_c(&self) -> bool {
        matches!(self, Escaped::AnsiC(_))
    }
}

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ANSI-C literals are already quoted, so they enter the token stream under
/// [`QuoteMode::None`]. Plain results are ordinary literals.
impl From<Escaped> for Token {
    fn from(escaped: Escaped) -> Self {
        match escaped {
            Escaped::Plain(s) => Token::Literal(s),
            Escaped::AnsiC(s) => QuoteMode::None.wrap([s]),
        }
    }
}

/// One unit of input: a byte of a byte string or a char of text.
trait Unit: Copy {
    fn code(self) -> u32;

    /// Escape a non-printable, non-control unit.
    fn push_escaped(self, encoding: Encoding, bash: bool, buf: &mut String) -> Result<()>;
}

fn push_byte(b: u8, bash: bool, buf: &mut String) {
    // Writing into a String cannot fail.
    let _ = if bash {
        write!(buf, "\\x{b:02X}")
    } else {
        write!(buf, "\\0{b:03o}")
    };
}

impl Unit for u8 {
    fn code(self) -> u32 {
        u32::from(self)
    }

    fn push_escaped(self, _encoding: Encoding, bash: bool, buf: &mut String) -> Result<()> {
        push_byte(self, bash, buf);
        Ok(())
    }
}

impl Unit for char {
    fn code(self) -> u32 {
        u32::from(self)
    }

    fn push_escaped(self, encoding: Encoding, bash: bool, buf: &mut String) -> Result<()> {
        if bash && encoding.is_symbolic() {
            let cp = u32::from(self);
            // bash reads at most four hex digits after \u
            let _ = if cp > 0xFFFF {
                write!(buf, "\\U{cp:08X}")
            } else {
                write!(buf, "\\u{cp:04X}")
            };
            return Ok(());
        }
        let mut bytes = Vec::with_capacity(4);
        encoding.encode(self, &mut bytes)?;
        for b in bytes {
            push_byte(b, bash, buf);
        }
        Ok(())
    }
}

/// Printable ASCII including space, excluding other whitespace.
fn is_printable(code: u32) -> bool {
    (0x20..=0x7E).contains(&code)
}

fn escape_units<U: Unit>(
    units: impl IntoIterator<Item = U>,
    options: &EscapeOptions,
) -> Result<Escaped> {
    let encoding = options.resolved_encoding();
    let mut buf = String::new();
    let mut encoded = false;

    for unit in units {
        let code = unit.code();
        if let Some(esc) = char::from_u32(code).and_then(control_escape) {
            buf.push_str(esc);
        } else if is_printable(code) {
            // printable codes are ASCII
            buf.push(code as u8 as char);
        } else {
            encoded |= options.bash;
            unit.push_escaped(encoding, options.bash, &mut buf)?;
        }
    }

    if !encoded {
        return Ok(Escaped::Plain(buf));
    }
    // Same rewrite as strong quoting, although $'…' would also accept \'.
    let body = buf.replace('\'', "'\\''");
    Ok(Escaped::AnsiC(format!("$'{body}'")))
}

/// Values the codec accepts: byte strings and text.
pub trait Escape {
    fn escape_with(&self, options: &EscapeOptions) -> Result<Escaped>;
}

impl Escape for [u8] {
    fn escape_with(&self, options: &EscapeOptions) -> Result<Escaped> {
        escape_units(self.iter().copied(), options)
    }
}

impl<const N: usize> Escape for [u8; N] {
    fn escape_with(&self, options: &EscapeOptions) -> Result<Escaped> {
        self.as_slice().escape_with(options)
    }
}

impl Escape for Vec<u8> {
    fn escape_with(&self, options: &EscapeOptions) -> Result<Escaped> {
        self.as_slice().escape_with(options)
    }
}

impl Escape for str {
    fn escape_with(&self, options: &EscapeOptions) -> Result<Escaped> {
        escape_units(self.chars(), options)
    }
}

impl Escape for String {
    fn escape_with(&self, options: &EscapeOptions) -> Result<Escaped> {
        self.as_str().escape_with(options)
    }
}

/// Escape bytes or text into a printable form.
///
/// ```
/// use shcmd::escape::{escape, EscapeOptions};
///
/// let plain = escape(b"\x01", &EscapeOptions::default()).unwrap();
/// assert_eq!(plain.as_str(), r"\0001");
///
/// let ansi = escape(b"\x01", &EscapeOptions::bash()).unwrap();
/// assert_eq!(ansi.as_str(), r"$'\x01'");
/// ```
pub fn escape<V: Escape + ?Sized>(value: &V, options: &EscapeOptions) -> Result<Escaped> {
    let escaped = value.escape_with(options)?;
    log::debug!("escaped value ({} bytes) as {:?}", escaped.as_str().len(), escaped);
    Ok(escaped)
}

/// Escape a byte string. Bytes never fail to encode.
pub fn escape_bytes(value: &[u8], bash: bool) -> Result<Escaped> {
    escape(
        value,
        &EscapeOptions {
            encoding: None,
            bash,
        },
    )
}

/// Escape text with the given options.
pub fn escape_str(value: &str, options: &EscapeOptions) -> Result<Escaped> {
    escape(value, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn plain(s: &str) -> Escaped {
        Escaped::Plain(s.to_owned())
    }

    fn ansi(s: &str) -> Escaped {
        Escaped::AnsiC(s.to_owned())
    }

    #[test]
    fn byte_octal() {
        assert_eq!(escape_bytes(b"\x01", false).unwrap(), plain(r"\0001"));
        assert_eq!(escape_bytes(b"\xff", false).unwrap(), plain(r"\0377"));
        assert_eq!(escape_bytes(b"\x7f", false).unwrap(), plain(r"\0177"));
        assert_eq!(escape_bytes(b"\x00", false).unwrap(), plain(r"\0000"));
    }

    #[test]
    fn byte_hex_in_bash_mode() {
        assert_eq!(escape_bytes(b"\x01", true).unwrap(), ansi(r"$'\x01'"));
        assert_eq!(escape_bytes(b"a\xffb", true).unwrap(), ansi(r"$'a\xFFb'"));
    }

    #[test]
    fn printable_passes_through() {
        assert_eq!(escape_bytes(b"hello world", false).unwrap(), plain("hello world"));
        assert_eq!(escape_bytes(b"hello world", true).unwrap(), plain("hello world"));
        assert_eq!(escape_str("it's $x\\", &EscapeOptions::bash()).unwrap(), plain("it's $x\\"));
    }

    #[test]
    fn control_escapes() {
        assert_eq!(escape_bytes(b"a\tb\n", false).unwrap(), plain(r"a\tb\n"));
        assert_eq!(
            escape_str("\x07\x08\x0b\x0c\r", &EscapeOptions::default()).unwrap(),
            plain(r"\a\b\v\f\r")
        );
    }

    #[test]
    fn control_alone_does_not_trigger_ansi_c() {
        assert_eq!(escape_bytes(b"a\nb", true).unwrap(), plain(r"a\nb"));
    }

    #[test]
    fn text_default_utf8_octal() {
        assert_eq!(
            escape_str("héllo", &EscapeOptions::default()).unwrap(),
            plain(r"h\0303\0251llo")
        );
    }

    #[test]
    fn text_bash_unicode() {
        assert_eq!(
            escape_str("héllo", &EscapeOptions::bash()).unwrap(),
            ansi(r"$'h\u00E9llo'")
        );
    }

    #[test]
    fn text_bash_astral() {
        assert_eq!(
            escape_str("😀", &EscapeOptions::bash()).unwrap(),
            ansi(r"$'\U0001F600'")
        );
    }

    #[test]
    fn text_bash_byte_encoding() {
        let opts = EscapeOptions::bash().with_encoding(Encoding::Utf8);
        assert_eq!(escape_str("é", &opts).unwrap(), ansi(r"$'\xC3\xA9'"));
        let opts = EscapeOptions::bash().with_encoding(Encoding::Utf16Le);
        assert_eq!(escape_str("é", &opts).unwrap(), ansi(r"$'\xE9\x00'"));
    }

    #[test]
    fn text_latin1_octal() {
        let opts = EscapeOptions::default().with_encoding(Encoding::Latin1);
        assert_eq!(escape_str("é", &opts).unwrap(), plain(r"\0351"));
    }

    #[test]
    fn unencodable_character() {
        let opts = EscapeOptions::default().with_encoding(Encoding::Ascii);
        assert!(matches!(
            escape_str("é", &opts),
            Err(Error::Unencodable { ch: 'é', encoding: "ascii" })
        ));
    }

    #[test]
    fn symbolic_encoding_outside_bash() {
        let opts = EscapeOptions::default().with_encoding(Encoding::Unicode);
        assert!(matches!(escape_str("é", &opts), Err(Error::SymbolicEncoding)));
        // only reached for units that need encoding
        assert_eq!(escape_str("abc", &opts).unwrap(), plain("abc"));
    }

    #[test]
    fn single_quote_rewritten_inside_ansi_c() {
        assert_eq!(escape_bytes(b"it's\x01", true).unwrap(), ansi(r"$'it'\''s\x01'"));
    }

    #[test]
    fn generic_entry_point() {
        let opts = EscapeOptions::default();
        assert_eq!(escape(&b"\x01"[..], &opts).unwrap(), plain(r"\0001"));
        assert_eq!(escape(&vec![1u8], &opts).unwrap(), plain(r"\0001"));
        assert_eq!(escape("x", &opts).unwrap(), plain("x"));
        assert_eq!(escape(&String::from("x"), &opts).unwrap(), plain("x"));
    }

    #[test]
    fn into_token() {
        assert_eq!(Token::from(plain("a b")), Token::Literal("a b".into()));
        assert_eq!(
            Token::from(ansi(r"$'\x01'")),
            QuoteMode::None.wrap([r"$'\x01'"])
        );
    }

    #[test]
    fn accessors() {
        let e = ansi("$'x'");
        assert!(e.is_ansi_c());
        assert_eq!(e.to_string(), "$'x'");
        assert_eq!(e.into_string(), "$'x'");
        assert!(!plain("x").is_ansi_c());
    }
}
