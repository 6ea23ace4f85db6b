//! Byte encodings available to the escape codec for text input.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Target encoding for non-printable characters of text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Symbolic `\uHHHH` escapes. Only meaningful in bash mode.
    Unicode,
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1; code points above U+00FF are unencodable.
    Latin1,
    /// 7-bit ASCII; code points above U+007F are unencodable.
    Ascii,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Unicode => "unicode",
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16-le",
            Encoding::Utf16Be => "utf-16-be",
            Encoding::Latin1 => "latin-1",
            Encoding::Ascii => "ascii",
        }
    }

    /// True when the encoding produces escapes rather than bytes.
    pub fn is_symbolic(self) -> bool {
        self == Encoding::Unicode
    }

    /// Append the encoded bytes of `c` to `out`.
    pub fn encode(self, c: char, out: &mut Vec<u8>) -> Result<()> {
        let unencodable = || Error::Unencodable {
            ch: c,
            encoding: self.name(),
        };
        match self {
            Encoding::Unicode => return Err(Error::SymbolicEncoding),
            Encoding::Utf8 => {
                let mut tmp = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            }
            Encoding::Utf16Le | Encoding::Utf16Be => {
                let mut tmp = [0u16; 2];
                for unit in c.encode_utf16(&mut tmp).iter() {
                    let bytes = if self == Encoding::Utf16Le {
                        unit.to_le_bytes()
                    } else {
                        unit.to_be_bytes()
                    };
                    out.extend_from_slice(&bytes);
                }
            }
            Encoding::Latin1 => {
                let b = u8::try_from(u32::from(c)).map_err(|_| unencodable())?;
                out.push(b);
            }
            Encoding::Ascii => {
                if !c.is_ascii() {
                    return Err(unencodable());
                }
                out.push(c as u8);
            }
        }
        Ok(())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        let enc = match norm.as_str() {
            "unicode" => Encoding::Unicode,
            "utf-8" | "utf8" => Encoding::Utf8,
            "utf-16-le" | "utf-16le" | "utf16le" => Encoding::Utf16Le,
            "utf-16-be" | "utf-16be" | "utf16be" => Encoding::Utf16Be,
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Encoding::Latin1,
            "ascii" | "us-ascii" => Encoding::Ascii,
            _ => return Err(Error::UnknownEncoding(s.to_owned())),
        };
        Ok(enc)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
