//! Error types for shcmd.
//!
//! Every variant describes a deterministic input problem. None of them are
//! transient, so callers should fix the token construction rather than retry.

use thiserror::Error;

/// Result type alias using shcmd's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A `PopQuote` was rendered with no matching `PushQuote`.
    #[error("quoting stack is empty")]
    QuotingStackUnderflow,

    /// Redirect operator does not match the redirect grammar.
    #[error("invalid redirect string: {0:?}")]
    InvalidRedirectSyntax(String),

    /// File descriptor target outside 0..=9.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(u32),

    /// No known command interpreter on this host.
    #[error("unsupported platform: {0}")]
    PlatformUnsupported(String),

    /// Character cannot be represented in the requested byte encoding.
    #[error("cannot encode {ch:?} as {encoding}")]
    Unencodable { ch: char, encoding: &'static str },

    /// The symbolic `unicode` encoding only applies to ANSI-C output.
    #[error("the unicode encoding requires bash mode")]
    SymbolicEncoding,

    /// Encoding name not recognized.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Token sequence in JSON form could not be decoded.
    #[error("invalid token json: {0}")]
    Json(#[from] serde_json::Error),

    /// Spawning or waiting on the interpreter failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
