//! shcmd: build shell command lines from tokens instead of string pasting.
//!
//! A command is described as a sequence of [`Token`]s: literal words, inline
//! groups, quoting-mode switches and a no-separator marker. [`render()`] turns
//! the sequence into one string in which every literal stays a single shell
//! word, quoting only what needs quoting. The [`escape()`] codec makes
//! arbitrary bytes or text printable, optionally as a bash `$'…'` literal.
//!
//! ```
//! use shcmd::{render, tokens, pipe, silent, QuoteMode};
//!
//! let cmd = render(tokens![
//!     "grep", "-r", QuoteMode::Weak.wrap(["fn main"]), "src",
//!     pipe(), "wc", "-l", silent(),
//! ]).unwrap();
//! assert_eq!(cmd, r#"grep -r "fn main" src | wc -l >/dev/null 2>&1"#);
//! ```
//!
//! # Architecture
//!
//! - **[`token`]** — Token vocabulary, operator builders, JSON token form.
//! - **[`render`](mod@render)** — The quoting serializer.
//! - **[`escape`](mod@escape)** — Byte/text escape codec with ANSI-C fallback.
//! - **[`shell`]** — Execution wrapper around the host interpreter.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Logger setup and command history.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error type shared by every module.
pub mod error;
/// Escape codec for bytes and text.
pub mod escape;
/// Logger initialization and command history file.
pub mod logging;
/// Token sequence to shell text.
pub mod render;
/// Running rendered commands.
pub mod shell;
/// Tokens, operators and their JSON form.
pub mod token;

pub use error::{Error, Result};
pub use escape::{Encoding, EscapeOptions, Escaped, escape};
pub use render::render;
pub use shell::{Shell, run};
pub use token::{
    QuoteMode, Token, append, background, pipe, quiet, redirect, redirect_fd, redirect_to, silent,
};
