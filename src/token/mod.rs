pub mod ops;
pub mod types;
pub mod wire;

pub use ops::{append, background, pipe, quiet, redirect, redirect_fd, redirect_to, silent};
pub use types::{QuoteMode, Token};
pub use wire::{TokenSpec, from_json};
